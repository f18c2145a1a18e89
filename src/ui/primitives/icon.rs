use crossterm::style::Stylize;

use infracheck::CheckStatus;

use crate::ui::theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    Success,
    Error,
    Warning,
    Skip,
    Progress,
    Arrow,
    Check,
    List,
}

impl Icon {
    pub fn for_status(status: CheckStatus) -> Self {
        match status {
            CheckStatus::Pass => Icon::Success,
            CheckStatus::Skip => Icon::Skip,
            CheckStatus::Fail => Icon::Error,
        }
    }

    pub fn render(&self, supports_unicode: bool) -> &'static str {
        match (supports_unicode, self) {
            (true, Icon::Success) => theme::icons::SUCCESS,
            (true, Icon::Error) => theme::icons::ERROR,
            (true, Icon::Warning) => theme::icons::WARNING,
            (true, Icon::Skip) => theme::icons::SKIP,
            (true, Icon::Progress) => theme::icons::PROGRESS,
            (true, Icon::Arrow) => theme::icons::ARROW,
            (true, Icon::Check) => theme::icons::CHECK,
            (true, Icon::List) => theme::icons::LIST,
            (false, Icon::Success) => theme::icons_ascii::SUCCESS,
            (false, Icon::Error) => theme::icons_ascii::ERROR,
            (false, Icon::Warning) => theme::icons_ascii::WARNING,
            (false, Icon::Skip) => theme::icons_ascii::SKIP,
            (false, Icon::Progress) => theme::icons_ascii::PROGRESS,
            (false, Icon::Arrow) => theme::icons_ascii::ARROW,
            (false, Icon::Check) => theme::icons_ascii::CHECK,
            (false, Icon::List) => theme::icons_ascii::LIST,
        }
    }

    pub fn colored(&self, supports_color: bool, supports_unicode: bool) -> String {
        let s = self.render(supports_unicode);
        if !supports_color {
            return s.to_string();
        }
        let color = match self {
            Icon::Success => theme::colors::SUCCESS,
            Icon::Error => theme::colors::ERROR,
            Icon::Warning | Icon::Progress => theme::colors::WARNING,
            Icon::Skip | Icon::Arrow => theme::colors::DIM,
            Icon::Check | Icon::List => theme::colors::INFO,
        };
        format!("{}", s.with(color))
    }
}
