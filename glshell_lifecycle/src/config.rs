use crate::error::ContextError;

/// Lowest OpenGL version that has a core profile.
pub const MIN_CORE_VERSION: (u8, u8) = (3, 2);

/// Boolean features requested from the windowing system when the context is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContextFlags {
    pub fullscreen: bool,
    pub vsync: bool,
    /// When false the cursor is hidden while it is over the window.
    pub cursor: bool,
    pub stereo: bool,
    /// Request a debug context and forward driver diagnostics to
    /// [`Application::on_debug_message`](crate::Application::on_debug_message).
    pub debug: bool,
    /// Request a robust context that is lost on GPU reset.
    pub robust: bool,
}

impl Default for ContextFlags {
    fn default() -> Self {
        Self {
            fullscreen: false,
            vsync: false,
            cursor: true,
            stereo: false,
            debug: cfg!(debug_assertions),
            robust: false,
        }
    }
}

/// Everything the platform needs to create a window and its context.
///
/// Applications adjust the defaults in [`Application::configure`](crate::Application::configure).
/// Once the window exists the configuration is read-only.
#[derive(Debug, Clone, PartialEq)]
pub struct ApplicationConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub major_version: u8,
    pub minor_version: u8,
    /// Number of samples for multisampling, 0 disables it.
    pub samples: u16,
    pub flags: ContextFlags,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        let (major_version, minor_version) = if cfg!(target_os = "macos") { (3, 2) } else { (4, 3) };

        Self {
            title: String::from("GLShell"),
            width: 800,
            height: 600,
            major_version,
            minor_version,
            samples: 0,
            flags: ContextFlags::default(),
        }
    }
}

impl ApplicationConfig {
    pub fn version(&self) -> (u8, u8) {
        (self.major_version, self.minor_version)
    }

    /// Checks the request before anything is handed to the windowing system.
    pub fn validate(&self) -> Result<(), ContextError> {
        if self.width == 0 || self.height == 0 {
            return Err(ContextError::InvalidConfig(format!(
                "window size must be non-zero, got {}x{}",
                self.width, self.height
            )));
        }

        if self.title.contains('\0') {
            return Err(ContextError::InvalidConfig(String::from("window title contains a NUL byte")));
        }

        if self.version() < MIN_CORE_VERSION {
            return Err(ContextError::UnsupportedVersion {
                major: self.major_version,
                minor: self.minor_version,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn defaults_match_the_reference_window() {
        let config = ApplicationConfig::default();

        assert_eq!(config.width, 800);
        assert_eq!(config.height, 600);
        assert_eq!(config.samples, 0);
        assert!(config.flags.cursor);
        assert!(!config.flags.fullscreen);
        assert!(!config.flags.stereo);
        assert!(config.version() >= MIN_CORE_VERSION);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_sized_window_is_rejected() {
        let config = ApplicationConfig { height: 0, ..ApplicationConfig::default() };

        match config.validate() {
            Err(ContextError::InvalidConfig(_)) => {}
            other => panic!("expected InvalidConfig, got {:?}", other),
        }
    }

    #[test]
    fn legacy_versions_have_no_core_profile() {
        let config = ApplicationConfig { major_version: 3, minor_version: 1, ..ApplicationConfig::default() };

        match config.validate() {
            Err(ContextError::UnsupportedVersion { major: 3, minor: 1 }) => {}
            other => panic!("expected UnsupportedVersion, got {:?}", other),
        }
    }

    #[test]
    fn nul_in_title_is_rejected() {
        let config = ApplicationConfig { title: String::from("bad\0title"), ..ApplicationConfig::default() };

        assert!(config.validate().is_err());
    }
}
