use infracheck::ConfigWarning;

use crate::ui::primitives::icon::Icon;

/// Surface unknown config keys.
///
/// NDJSON mode keeps stdout machine-readable, so warnings go to the log only.
pub fn print_config_warnings(warnings: &[ConfigWarning], json: bool, unicode: bool) {
    for w in warnings {
        if json {
            tracing::warn!(key = %w.key, file = %w.file.display(), "unknown config key");
            continue;
        }

        let icon = Icon::Warning.render(unicode);
        match w.line {
            Some(line) => eprintln!(
                "{} Unknown config key '{}' in {}:{}",
                icon,
                w.key,
                w.file.display(),
                line
            ),
            None => eprintln!("{} Unknown config key '{}' in {}", icon, w.key, w.file.display()),
        }

        if let Some(suggestion) = &w.suggestion {
            eprintln!("   Did you mean '{}'?\n", suggestion);
        }
    }
}
