use crate::ui::theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BorderChar {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
    Horizontal,
    Vertical,
}

impl BorderChar {
    pub fn render(&self, supports_unicode: bool) -> &'static str {
        use theme::{borders as u, borders_ascii as a};
        match self {
            BorderChar::TopLeft => pick(supports_unicode, u::TOP_LEFT, a::TOP_LEFT),
            BorderChar::TopRight => pick(supports_unicode, u::TOP_RIGHT, a::TOP_RIGHT),
            BorderChar::BottomLeft => pick(supports_unicode, u::BOTTOM_LEFT, a::BOTTOM_LEFT),
            BorderChar::BottomRight => pick(supports_unicode, u::BOTTOM_RIGHT, a::BOTTOM_RIGHT),
            BorderChar::Horizontal => pick(supports_unicode, u::HORIZONTAL, a::HORIZONTAL),
            BorderChar::Vertical => pick(supports_unicode, u::VERTICAL, a::VERTICAL),
        }
    }
}

fn pick(unicode: bool, fancy: &'static str, plain: &'static str) -> &'static str {
    if unicode {
        fancy
    } else {
        plain
    }
}
