//! Bridges `glDebugMessageCallback` to the lifecycle's debug channel.

use std::ffi::{c_void, CStr};
use std::ptr;
use std::slice;

use gl::types::*;
use lifecycle::{DebugKind, DebugMessage, DebugSender, DebugSeverity, DebugSource};

pub fn source_from_gl(value: GLenum) -> DebugSource {
    match value {
        gl::DEBUG_SOURCE_API => DebugSource::Api,
        gl::DEBUG_SOURCE_WINDOW_SYSTEM => DebugSource::WindowSystem,
        gl::DEBUG_SOURCE_SHADER_COMPILER => DebugSource::ShaderCompiler,
        gl::DEBUG_SOURCE_THIRD_PARTY => DebugSource::ThirdParty,
        gl::DEBUG_SOURCE_APPLICATION => DebugSource::Application,
        gl::DEBUG_SOURCE_OTHER => DebugSource::Other,
        other => DebugSource::Unknown(other),
    }
}

pub fn kind_from_gl(value: GLenum) -> DebugKind {
    match value {
        gl::DEBUG_TYPE_ERROR => DebugKind::Error,
        gl::DEBUG_TYPE_DEPRECATED_BEHAVIOR => DebugKind::DeprecatedBehavior,
        gl::DEBUG_TYPE_UNDEFINED_BEHAVIOR => DebugKind::UndefinedBehavior,
        gl::DEBUG_TYPE_PORTABILITY => DebugKind::Portability,
        gl::DEBUG_TYPE_PERFORMANCE => DebugKind::Performance,
        gl::DEBUG_TYPE_MARKER => DebugKind::Marker,
        gl::DEBUG_TYPE_PUSH_GROUP => DebugKind::PushGroup,
        gl::DEBUG_TYPE_POP_GROUP => DebugKind::PopGroup,
        gl::DEBUG_TYPE_OTHER => DebugKind::Other,
        other => DebugKind::Unknown(other),
    }
}

pub fn severity_from_gl(value: GLenum) -> DebugSeverity {
    match value {
        gl::DEBUG_SEVERITY_HIGH => DebugSeverity::High,
        gl::DEBUG_SEVERITY_MEDIUM => DebugSeverity::Medium,
        gl::DEBUG_SEVERITY_LOW => DebugSeverity::Low,
        gl::DEBUG_SEVERITY_NOTIFICATION => DebugSeverity::Notification,
        other => DebugSeverity::Unknown(other),
    }
}

/// # Safety
///
/// `message` must point to `length` bytes, or to a NUL-terminated string if `length` is
/// negative.
unsafe fn message_text(message: *const GLchar, length: GLsizei) -> String {
    if length < 0 {
        return CStr::from_ptr(message).to_string_lossy().into_owned();
    }

    let bytes = slice::from_raw_parts(message as *const u8, length as usize);
    String::from_utf8_lossy(bytes).trim_end_matches('\0').to_owned()
}

/// Capabilities enabled while the hook is installed. Synchronous output keeps the callback on the
/// thread that issued the GL call, so no callback can still be running once the hook is dropped.
pub(crate) const DEBUG_CAPABILITIES: [GLenum; 2] = [gl::DEBUG_OUTPUT, gl::DEBUG_OUTPUT_SYNCHRONOUS];

/// Only hands the message to the sender.
extern "system" fn debug_callback(
    source: GLenum,
    kind: GLenum,
    id: GLuint,
    severity: GLenum,
    length: GLsizei,
    message: *const GLchar,
    user_param: *mut c_void,
) {
    if user_param.is_null() || message.is_null() {
        return;
    }

    let sender = unsafe { &*(user_param as *const DebugSender) };
    let text = unsafe { message_text(message, length) };

    sender.deliver(DebugMessage {
        source: source_from_gl(source),
        kind: kind_from_gl(kind),
        id,
        severity: severity_from_gl(severity),
        text,
    });
}

/// Keeps the sender registered with the driver alive, and unregisters it when dropped.
///
/// Must be dropped while the context it was installed on is still current.
pub(crate) struct DebugHook {
    sender: *mut DebugSender,
}

impl DebugHook {
    /// # Safety
    ///
    /// A GL context with `glDebugMessageCallback` loaded must be current.
    pub(crate) unsafe fn install(sender: DebugSender) -> Self {
        let sender = Box::into_raw(Box::new(sender));

        for &capability in DEBUG_CAPABILITIES.iter() {
            gl::Enable(capability);
        }
        gl::DebugMessageCallback(Some(debug_callback), sender as *const c_void);

        Self { sender }
    }
}

impl Drop for DebugHook {
    fn drop(&mut self) {
        unsafe {
            gl::DebugMessageCallback(None, ptr::null());
            for &capability in DEBUG_CAPABILITIES.iter().rev() {
                gl::Disable(capability);
            }
            drop(Box::from_raw(self.sender));
        }
    }
}

#[cfg(test)]
mod test {
    use std::ffi::CString;

    use lifecycle::debug;

    use super::*;

    #[test]
    fn gl_enums_map_to_typed_values() {
        assert_eq!(source_from_gl(gl::DEBUG_SOURCE_SHADER_COMPILER), DebugSource::ShaderCompiler);
        assert_eq!(kind_from_gl(gl::DEBUG_TYPE_PERFORMANCE), DebugKind::Performance);
        assert_eq!(severity_from_gl(gl::DEBUG_SEVERITY_HIGH), DebugSeverity::High);
        assert_eq!(severity_from_gl(0x1234), DebugSeverity::Unknown(0x1234));
    }

    #[test]
    fn callback_forwards_to_the_sender() {
        let (tx, rx) = debug::channel(4);
        let text = CString::new("Buffer object 3 will use VIDEO memory").unwrap();
        let sender = Box::into_raw(Box::new(tx));

        debug_callback(
            gl::DEBUG_SOURCE_API,
            gl::DEBUG_TYPE_OTHER,
            131185,
            gl::DEBUG_SEVERITY_NOTIFICATION,
            -1,
            text.as_ptr(),
            sender as *mut c_void,
        );
        unsafe { drop(Box::from_raw(sender)) };

        let message = rx.try_next().expect("message delivered");
        assert_eq!(message.source, DebugSource::Api);
        assert_eq!(message.kind, DebugKind::Other);
        assert_eq!(message.id, 131185);
        assert_eq!(message.severity, DebugSeverity::Notification);
        assert_eq!(message.text, "Buffer object 3 will use VIDEO memory");
    }

    #[test]
    fn explicit_length_excludes_trailing_nul() {
        let raw = b"shader recompiled\0";

        let text = unsafe { message_text(raw.as_ptr() as *const GLchar, raw.len() as GLsizei) };

        assert_eq!(text, "shader recompiled");
    }

    #[test]
    fn installed_output_is_synchronous() {
        assert!(DEBUG_CAPABILITIES.contains(&gl::DEBUG_OUTPUT));
        assert!(DEBUG_CAPABILITIES.contains(&gl::DEBUG_OUTPUT_SYNCHRONOUS));
    }

    #[test]
    fn callback_without_user_data_is_ignored() {
        let text = CString::new("ignored").unwrap();

        debug_callback(0, 0, 0, 0, -1, text.as_ptr(), ptr::null_mut());
    }
}
