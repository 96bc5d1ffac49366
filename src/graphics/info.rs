use gl::types::*;

use super::utils::{gl_integer, gl_string, gl_string_at};

/// Identification and capabilities of the current GL context.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContextInfo {
    pub vendor: String,
    pub version: String,
    pub renderer: String,
    pub major: i32,
    pub minor: i32,
    pub extensions: Vec<String>,
}

impl ContextInfo {
    /// Queries the context that is current on this thread.
    pub fn query() -> Self {
        let count = gl_integer(gl::NUM_EXTENSIONS).max(0) as GLuint;
        let extensions = (0..count)
            .filter_map(|i| gl_string_at(gl::EXTENSIONS, i))
            .collect();

        Self {
            vendor: gl_string(gl::VENDOR).unwrap_or_default(),
            version: gl_string(gl::VERSION).unwrap_or_default(),
            renderer: gl_string(gl::RENDERER).unwrap_or_default(),
            major: gl_integer(gl::MAJOR_VERSION),
            minor: gl_integer(gl::MINOR_VERSION),
            extensions,
        }
    }

    /// Whether the context is at least the requested version.
    pub fn supports(&self, (major, minor): (u8, u8)) -> bool {
        (self.major, self.minor) >= (i32::from(major), i32::from(minor))
    }

    pub fn has_extension(&self, name: &str) -> bool {
        self.extensions.iter().any(|e| e == name)
    }

    pub fn log(&self) {
        info!("VENDOR: {}", self.vendor);
        info!("VERSION: {}", self.version);
        info!("RENDERER: {}", self.renderer);
        info!("GL_EXTENSIONS ({}):", self.extensions.len());
        for extension in &self.extensions {
            info!("{}", extension);
        }
    }
}

#[cfg(test)]
mod test {
    use super::ContextInfo;

    fn info(major: i32, minor: i32) -> ContextInfo {
        ContextInfo {
            major,
            minor,
            extensions: vec![String::from("GL_KHR_debug"), String::from("GL_ARB_robustness")],
            ..ContextInfo::default()
        }
    }

    #[test]
    fn version_check_compares_major_then_minor() {
        assert!(info(4, 6).supports((4, 3)));
        assert!(info(4, 3).supports((4, 3)));
        assert!(info(4, 0).supports((3, 3)));
        assert!(!info(4, 1).supports((4, 3)));
        assert!(!info(3, 3).supports((4, 0)));
    }

    #[test]
    fn extensions_match_exactly() {
        let info = info(4, 3);

        assert!(info.has_extension("GL_KHR_debug"));
        assert!(!info.has_extension("GL_KHR"));
        assert!(!info.has_extension("GL_ARB_compute_shader"));
    }
}
