/// Background color of a HipChat notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Red,
    Yellow,
    Green,
    Gray,
}

impl Color {
    /// Pick a color from a syslog-style severity.
    ///
    /// 0-3 (emergency through error) are red, 4 (warning) is yellow, 5-6
    /// (notice, info) are green, everything else is gray.
    pub fn from_severity(severity: i32) -> Self {
        match severity {
            0..=3 => Self::Red,
            4 => Self::Yellow,
            5..=6 => Self::Green,
            _ => Self::Gray,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Red => "red",
            Self::Yellow => "yellow",
            Self::Green => "green",
            Self::Gray => "gray",
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
