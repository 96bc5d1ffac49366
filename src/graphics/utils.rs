use std::ffi::CStr;

use gl::types::*;

/// Reads a driver info log of `len` bytes (including the terminating NUL) with `read`.
fn read_info_log<F: FnOnce(GLsizei, *mut GLsizei, *mut GLchar)>(len: GLint, read: F) -> String {
    if len <= 0 {
        return String::new();
    }

    let mut buffer: Vec<u8> = vec![0; len as usize];
    let mut written: GLsizei = 0;
    read(len, &mut written, buffer.as_mut_ptr() as *mut GLchar);
    buffer.truncate(written.max(0) as usize);

    String::from_utf8_lossy(&buffer).trim_end().to_owned()
}

pub fn shader_info_log(id: GLuint) -> String {
    let mut len = 0;
    unsafe {
        gl::GetShaderiv(id, gl::INFO_LOG_LENGTH, &mut len);
    }

    read_info_log(len, |len, written, buffer| unsafe {
        gl::GetShaderInfoLog(id, len, written, buffer);
    })
}

pub fn program_info_log(id: GLuint) -> String {
    let mut len = 0;
    unsafe {
        gl::GetProgramiv(id, gl::INFO_LOG_LENGTH, &mut len);
    }

    read_info_log(len, |len, written, buffer| unsafe {
        gl::GetProgramInfoLog(id, len, written, buffer);
    })
}

fn string_from_ptr(ptr: *const GLubyte) -> Option<String> {
    if ptr.is_null() {
        return None;
    }

    let text = unsafe { CStr::from_ptr(ptr as *const GLchar) };
    Some(text.to_string_lossy().into_owned())
}

pub fn gl_string(name: GLenum) -> Option<String> {
    string_from_ptr(unsafe { gl::GetString(name) })
}

pub fn gl_string_at(name: GLenum, index: GLuint) -> Option<String> {
    string_from_ptr(unsafe { gl::GetStringi(name, index) })
}

pub fn gl_integer(name: GLenum) -> GLint {
    let mut value = 0;
    unsafe {
        gl::GetIntegerv(name, &mut value);
    }
    value
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn info_log_stops_at_the_written_length() {
        let log = read_info_log(16, |len, written, buffer| unsafe {
            assert_eq!(len, 16);
            let text = b"0:1: error\n\0";
            std::ptr::copy_nonoverlapping(text.as_ptr() as *const GLchar, buffer, text.len());
            *written = (text.len() - 1) as GLsizei;
        });

        assert_eq!(log, "0:1: error");
    }

    #[test]
    fn empty_info_log_is_never_read() {
        let log = read_info_log(0, |_, _, _| panic!("nothing to read"));

        assert!(log.is_empty());
    }
}
