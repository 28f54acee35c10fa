use std::error::Error;
use std::fmt;

/// One-off error notification for the screens.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ErrorEvent {
    pub message: String,
    pub title: Option<String>,
    pub action_label: Option<String>,
}

impl ErrorEvent {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            title: None,
            action_label: None,
        }
    }

    pub fn from_error(err: &(dyn Error + 'static)) -> Self {
        Self::new(err.to_string()).title("Error")
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn action_label(mut self, label: impl Into<String>) -> Self {
        self.action_label = Some(label.into());
        self
    }
}

impl fmt::Display for ErrorEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[SNACKBAR]")?;
        if let Some(title) = &self.title {
            write!(f, " {title}:")?;
        }
        write!(f, " {}", self.message)?;
        if let Some(label) = &self.action_label {
            write!(f, " [{label}]")?;
        }
        Ok(())
    }
}

/// Print the event where a snackbar would appear.
pub fn show_snackbar(event: &ErrorEvent) {
    println!("{event}");
}
