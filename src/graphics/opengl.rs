//! Shader and program objects.
//!
//! Compilation and linking never abort: on failure the driver's info log is logged at error
//! level and the (unusable) handle is still returned. Callers that need to react use
//! [`Shader::check`] or [`Program::check`].

use std::ffi::CString;
use std::path::Path;
use std::ptr::null;

use gl::types::*;

use super::loader::read_shader;
use super::utils::{program_info_log, shader_info_log};
use super::GraphicsError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShaderKind {
    Vertex,
    Fragment,
    Geometry,
    TessControl,
    TessEvaluation,
    Compute,
}

impl ShaderKind {
    pub fn gl_enum(self) -> GLenum {
        match self {
            ShaderKind::Vertex => gl::VERTEX_SHADER,
            ShaderKind::Fragment => gl::FRAGMENT_SHADER,
            ShaderKind::Geometry => gl::GEOMETRY_SHADER,
            ShaderKind::TessControl => gl::TESS_CONTROL_SHADER,
            ShaderKind::TessEvaluation => gl::TESS_EVALUATION_SHADER,
            ShaderKind::Compute => gl::COMPUTE_SHADER,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ShaderKind::Vertex => "vertex",
            ShaderKind::Fragment => "fragment",
            ShaderKind::Geometry => "geometry",
            ShaderKind::TessControl => "tessellation control",
            ShaderKind::TessEvaluation => "tessellation evaluation",
            ShaderKind::Compute => "compute",
        }
    }
}

/// A shader object. Deleted when dropped.
#[derive(Debug)]
pub struct Shader {
    id: GLuint,
    kind: ShaderKind,
    error: Option<GraphicsError>,
}

impl Shader {
    pub fn compile(kind: ShaderKind, source: &str) -> Self {
        let id = unsafe { gl::CreateShader(kind.gl_enum()) };

        let source = match CString::new(source) {
            Ok(source) => source,
            Err(e) => {
                let error = GraphicsError::InvalidSource(format!("NUL byte at offset {}", e.nul_position()));
                error!("Failed to compile {} shader: {}", kind.name(), error);
                return Self { id, kind, error: Some(error) };
            }
        };

        let mut status = GLint::from(gl::FALSE);
        unsafe {
            gl::ShaderSource(id, 1, &source.as_ptr(), null());
            gl::CompileShader(id);
            gl::GetShaderiv(id, gl::COMPILE_STATUS, &mut status);
        }

        let error = if status == GLint::from(gl::TRUE) {
            None
        } else {
            let log = shader_info_log(id);
            error!("Failed to compile {} shader: {}", kind.name(), log);
            Some(GraphicsError::ShaderCompile { kind: kind.name(), log })
        };

        Self { id, kind, error }
    }

    /// Compiles the source at `path`. A missing file compiles an empty source, which fails.
    pub fn from_file<P: AsRef<Path>>(kind: ShaderKind, path: P) -> Self {
        Self::compile(kind, &read_shader(path))
    }

    pub fn id(&self) -> GLuint {
        self.id
    }

    pub fn kind(&self) -> ShaderKind {
        self.kind
    }

    pub fn is_compiled(&self) -> bool {
        self.error.is_none()
    }

    pub fn check(&self) -> Result<(), GraphicsError> {
        match &self.error {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }
}

impl Drop for Shader {
    fn drop(&mut self) {
        unsafe {
            gl::DeleteShader(self.id);
        }
    }
}

/// A linked program object. Deleted when dropped.
#[derive(Debug)]
pub struct Program {
    id: GLuint,
    error: Option<GraphicsError>,
}

impl Program {
    /// Links `shaders` into a program. The shaders are detached again afterwards so they can be
    /// dropped independently.
    pub fn link(shaders: &[Shader]) -> Self {
        let id = unsafe { gl::CreateProgram() };
        let mut status = GLint::from(gl::FALSE);

        unsafe {
            for shader in shaders {
                gl::AttachShader(id, shader.id());
            }

            gl::LinkProgram(id);
            gl::GetProgramiv(id, gl::LINK_STATUS, &mut status);

            for shader in shaders {
                gl::DetachShader(id, shader.id());
            }
        }

        let error = if status == GLint::from(gl::TRUE) {
            None
        } else {
            let log = program_info_log(id);
            error!("Failed to link program: {}", log);
            Some(GraphicsError::ProgramLink(log))
        };

        Self { id, error }
    }

    pub fn id(&self) -> GLuint {
        self.id
    }

    pub fn is_linked(&self) -> bool {
        self.error.is_none()
    }

    pub fn check(&self) -> Result<(), GraphicsError> {
        match &self.error {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }

    pub fn set_used(&self) {
        unsafe {
            gl::UseProgram(self.id);
        }
    }
}

impl Drop for Program {
    fn drop(&mut self) {
        unsafe {
            gl::DeleteProgram(self.id);
        }
    }
}
