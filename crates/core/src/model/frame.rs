/// Namespace separator for managed (JVM/ART) frames.
pub const MANAGED_SEPARATOR: &str = ".";
/// Namespace separator for native (C/C++) frames.
pub const NATIVE_SEPARATOR: &str = "::";

/// A method name split from its qualifying namespace
/// (`com.example.Foo` + `bar`, or `std::vector` + `push_back`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FrameName {
    pub namespace: String,
    pub name: String,
}

impl FrameName {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
        }
    }

    /// Split a fully-qualified name at its last `separator`.
    pub fn parse(qualified: &str, separator: &str) -> Self {
        match qualified.rsplit_once(separator) {
            Some((namespace, name)) => Self::new(namespace, name),
            None => Self::new("", qualified),
        }
    }

    pub fn qualified(&self, separator: &str) -> String {
        if self.namespace.is_empty() {
            self.name.clone()
        } else {
            format!("{}{separator}{}", self.namespace, self.name)
        }
    }
}

/// Payload carried by a call-chart node.
#[derive(Debug, Clone, PartialEq)]
pub enum FramePayload {
    /// A managed-code method frame.
    Managed(FrameName),
    /// A native frame.
    Native(FrameName),
    /// A frame colored by a usage metric in `[0, 1]` (e.g. share of CPU time).
    Usage { name: FrameName, usage: f64 },
}

impl FramePayload {
    pub fn managed(qualified: &str) -> Self {
        Self::Managed(FrameName::parse(qualified, MANAGED_SEPARATOR))
    }

    pub fn native(qualified: &str) -> Self {
        Self::Native(FrameName::parse(qualified, NATIVE_SEPARATOR))
    }

    pub fn usage(qualified: &str, usage: f64) -> Self {
        Self::Usage {
            name: FrameName::parse(qualified, MANAGED_SEPARATOR),
            usage,
        }
    }

    pub fn name(&self) -> &FrameName {
        match self {
            Self::Managed(name) | Self::Native(name) | Self::Usage { name, .. } => name,
        }
    }

    pub fn separator(&self) -> &'static str {
        match self {
            Self::Native(_) => NATIVE_SEPARATOR,
            Self::Managed(_) | Self::Usage { .. } => MANAGED_SEPARATOR,
        }
    }
}
