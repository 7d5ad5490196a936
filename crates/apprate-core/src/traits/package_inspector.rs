//! Package inspector trait.

use std::collections::HashSet;

use crate::error::AppRateResult;

/// Answers whether a package is installed on the device.
///
/// Errors are treated as "not installed" by callers.
#[cfg_attr(test, mockall::automock)]
pub trait PackageInspector: Send + Sync {
    /// Check whether `package_id` is installed.
    fn is_installed(&self, package_id: &str) -> AppRateResult<bool>;
}

/// Inspector backed by a fixed set of package ids.
#[derive(Debug, Clone, Default)]
pub struct InstalledPackages {
    packages: HashSet<String>,
}

impl InstalledPackages {
    /// Create an inspector that reports nothing as installed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a package as installed.
    pub fn with(mut self, package_id: impl Into<String>) -> Self {
        self.packages.insert(package_id.into());
        self
    }
}

impl<S: Into<String>> FromIterator<S> for InstalledPackages {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            packages: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl PackageInspector for InstalledPackages {
    fn is_installed(&self, package_id: &str) -> AppRateResult<bool> {
        Ok(!package_id.is_empty() && self.packages.contains(package_id))
    }
}
