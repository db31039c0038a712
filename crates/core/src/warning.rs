use std::fmt;

/// Non-fatal conditions reported to the user. They never change the exit status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// File or stdin input without `--base`.
    MissingBaseUrl,
    /// A deprecated option or value was used; holds the replacement hint.
    DeprecatedOption { option: &'static str, hint: &'static str },
    /// Extraction found no article and the original document is emitted instead.
    NoArticleFallback,
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingBaseUrl => {
                write!(f, "no base URL given; relative links in the output will not resolve (use --base)")
            }
            Self::DeprecatedOption { option, hint } => write!(f, "{option} is deprecated; {hint}"),
            Self::NoArticleFallback => {
                write!(f, "no readable content found; writing the original document instead")
            }
        }
    }
}
