use tracing::{error, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Variant {
    #[default]
    Default,
    Destructive,
}

/// A transient message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: Option<String>,
    pub description: String,
    pub variant: Variant,
}

impl Notification {
    pub fn success(description: impl Into<String>) -> Self {
        Self {
            title: None,
            description: description.into(),
            variant: Variant::Default,
        }
    }

    pub fn failure(description: impl Into<String>) -> Self {
        Self {
            title: Some("Submit failed:".to_string()),
            description: description.into(),
            variant: Variant::Destructive,
        }
    }
}

pub trait Notifier {
    fn notify(&self, notification: Notification);
}

/// Prints notifications to the terminal.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, notification: Notification) {
        let line = match &notification.title {
            Some(title) => format!("{} {}", title, notification.description),
            None => notification.description.clone(),
        };
        match notification.variant {
            Variant::Default => {
                info!("{}", line);
                println!("{line}");
            }
            Variant::Destructive => {
                error!("{}", line);
                eprintln!("{line}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_is_destructive_with_title() {
        let notification = Notification::failure("Network Error");
        assert_eq!(notification.title.as_deref(), Some("Submit failed:"));
        assert_eq!(notification.description, "Network Error");
        assert_eq!(notification.variant, Variant::Destructive);
    }

    #[test]
    fn test_success_has_no_title() {
        let notification = Notification::success("Your ticket has been queued");
        assert!(notification.title.is_none());
        assert_eq!(notification.variant, Variant::Default);
    }
}
