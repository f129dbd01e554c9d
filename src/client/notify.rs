use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
}

/// A transient message for the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
}

impl fmt::Display for Toast {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ToastKind::Success => write!(f, "[ok] {}", self.message),
            ToastKind::Error => write!(f, "[error] {}", self.message),
        }
    }
}

/// Collects toasts raised by the pages until the front end shows them.
#[derive(Debug, Default)]
pub struct Notifier {
    pending: Vec<Toast>,
}

impl Notifier {
    pub fn success(&mut self, message: impl Into<String>) {
        self.pending.push(Toast {
            kind: ToastKind::Success,
            message: message.into(),
        });
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.pending.push(Toast {
            kind: ToastKind::Error,
            message: message.into(),
        });
    }

    pub fn last(&self) -> Option<&Toast> {
        self.pending.last()
    }

    /// Takes every pending toast, oldest first.
    pub fn drain(&mut self) -> Vec<Toast> {
        std::mem::take(&mut self.pending)
    }
}
