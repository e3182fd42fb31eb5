//! Integration tests for the generated entry point table.

use glbind_fixture::{Gl, gl};
use std::cell::Cell;
use std::ffi::{CStr, c_char, c_void};
use std::rc::Rc;
use std::sync::atomic::{AtomicU32, Ordering};

static CLEAR_MASK: AtomicU32 = AtomicU32::new(0);
static ALPHA_REF_BITS: AtomicU32 = AtomicU32::new(0);

extern "system" fn fake_clear(mask: u32) {
    CLEAR_MASK.store(mask, Ordering::SeqCst);
}

extern "system" fn fake_get_string(name: gl::StringName) -> *const u8 {
    match name {
        gl::StringName::VERSION => c"2.0 fixture".as_ptr().cast(),
        gl::StringName::VENDOR => c"glbind".as_ptr().cast(),
        _ => std::ptr::null(),
    }
}

extern "system" fn fake_is_enabled(cap: gl::EnableCap) -> u8 {
    u8::from(cap == gl::EnableCap::DEPTH_TEST)
}

extern "system" fn fake_alpha_func(func: gl::AlphaFunction, r: f32) {
    if func == gl::AlphaFunction::ALWAYS {
        ALPHA_REF_BITS.store(r.to_bits(), Ordering::SeqCst);
    }
}

extern "system" fn fake_get_integerv(pname: gl::GetPName, data: *mut i32) {
    if pname == gl::GetPName::MAX_TEXTURE_SIZE {
        unsafe { *data = 4096 };
    }
}

extern "system" fn fake_get_error() -> u32 {
    0
}

extern "system" fn fake_get_shader_info_log(
    shader: u32,
    buf_size: i32,
    length: *mut i32,
    info_log: *mut c_char,
) {
    let log = format!("shader {shader} ok");
    let written = log.len().min(buf_size.max(1) as usize - 1);
    unsafe {
        std::ptr::copy_nonoverlapping(log.as_ptr().cast(), info_log, written);
        *info_log.add(written) = 0;
        if !length.is_null() {
            *length = written as i32;
        }
    }
}

/// Resolves a fixed subset of the fixture's commands; everything else is null.
fn resolve(name: &str) -> *const c_void {
    match name {
        "glClear" => fake_clear as *const c_void,
        "glGetString" => fake_get_string as *const c_void,
        "glIsEnabled" => fake_is_enabled as *const c_void,
        "glAlphaFunc" => fake_alpha_func as *const c_void,
        "glGetIntegerv" => fake_get_integerv as *const c_void,
        "glGetError" => fake_get_error as *const c_void,
        "glGetShaderInfoLog" => fake_get_shader_info_log as *const c_void,
        _ => std::ptr::null(),
    }
}

/// Wraps [`resolve`] and counts lookups.
fn counting_resolver(calls: &Rc<Cell<usize>>) -> impl FnMut(&str) -> *const c_void + 'static {
    let calls = Rc::clone(calls);
    move |name: &str| {
        calls.set(calls.get() + 1);
        resolve(name)
    }
}

#[test]
fn test_new_table_is_unloaded() {
    let table = Gl::new();
    for name in ["glClear", "glGetString", "glFinish", "glShaderSource"] {
        assert!(!table.is_loaded(name), "{name} should start unloaded");
    }
    assert!(!table.is_loaded("glNotACommand"));
}

#[test]
fn test_load_all_binds_resolved_commands() {
    let mut table = Gl::new();
    table.load_all_functions(resolve);

    for name in [
        "glClear",
        "glGetString",
        "glIsEnabled",
        "glAlphaFunc",
        "glGetIntegerv",
        "glGetError",
        "glGetShaderInfoLog",
    ] {
        assert!(table.is_loaded(name), "{name} should be loaded");
    }
    for name in ["glEnable", "glDeleteTextures", "glFinish", "glShaderSource"] {
        assert!(!table.is_loaded(name), "{name} should stay unloaded");
    }
}

#[test]
fn test_load_all_queries_every_command() {
    let calls = Rc::new(Cell::new(0));
    let mut table = Gl::new();
    table.load_all_functions(counting_resolver(&calls));
    assert_eq!(calls.get(), 11);
}

#[test]
fn test_trampolines_forward_to_slots() {
    let mut table = Gl::new();
    table.load_all_functions(resolve);

    unsafe {
        table.glClear(0x4100);
        assert_eq!(CLEAR_MASK.load(Ordering::SeqCst), 0x4100);

        let version = CStr::from_ptr(table.glGetString(gl::StringName::VERSION).cast());
        assert_eq!(version.to_str().unwrap(), "2.0 fixture");

        assert_eq!(table.glIsEnabled(gl::EnableCap::DEPTH_TEST), 1);
        assert_eq!(table.glIsEnabled(gl::EnableCap::BLEND), 0);

        table.glAlphaFunc(gl::AlphaFunction::ALWAYS, 0.5);
        assert_eq!(f32::from_bits(ALPHA_REF_BITS.load(Ordering::SeqCst)), 0.5);

        let mut max = 0;
        table.glGetIntegerv(gl::GetPName::MAX_TEXTURE_SIZE, &mut max);
        assert_eq!(max, 4096);

        assert_eq!(table.glGetError(), 0);
    }
}

#[test]
fn test_camel_case_parameters_forward() {
    let mut table = Gl::new();
    table.load_all_functions(resolve);

    let mut buf = [0 as c_char; 32];
    let mut length = 0;
    unsafe { table.glGetShaderInfoLog(7, buf.len() as i32, &mut length, buf.as_mut_ptr()) };

    let log = unsafe { CStr::from_ptr(buf.as_ptr()) };
    assert_eq!(log.to_bytes(), b"shader 7 ok");
    assert_eq!(length, 11);
}

#[test]
fn test_narrow_loader_binds_only_get_string() {
    let calls = Rc::new(Cell::new(0));
    let mut table = Gl::new();
    table.load_get_string(counting_resolver(&calls));

    assert_eq!(calls.get(), 1);
    assert!(table.is_loaded("glGetString"));
    assert!(!table.is_loaded("glClear"));

    let vendor = unsafe { CStr::from_ptr(table.glGetString(gl::StringName::VENDOR).cast()) };
    assert_eq!(vendor.to_bytes(), b"glbind");
}

#[test]
fn test_load_one_uses_stored_resolver() {
    let calls = Rc::new(Cell::new(0));
    let mut table = Gl::new();
    table.load_get_string(counting_resolver(&calls));

    assert!(table.load("glClear"));
    assert!(table.is_loaded("glClear"));
    assert!(!table.load("glFinish"));
    assert!(!table.load("glNotACommand"));
    assert_eq!(calls.get(), 3);
}

#[test]
fn test_load_one_without_resolver() {
    let mut table = Gl::new();
    assert!(!table.load("glClear"));
    assert!(!table.is_loaded("glClear"));
}

#[test]
fn test_reload_replaces_slots() {
    let mut table = Gl::new();
    table.load_all_functions(resolve);
    assert!(table.is_loaded("glClear"));

    table.load_all_functions(|_: &str| std::ptr::null());
    assert!(!table.is_loaded("glClear"));
    assert!(!table.is_loaded("glGetString"));
}

#[test]
fn test_tables_are_independent() {
    let mut loaded = Gl::new();
    loaded.load_all_functions(resolve);
    let mut narrow = Gl::new();
    narrow.load_get_string(resolve);

    assert!(loaded.is_loaded("glClear"));
    assert!(!narrow.is_loaded("glClear"));
    assert!(narrow.is_loaded("glGetString"));
}

#[test]
#[should_panic(expected = "glFinish is not loaded")]
fn test_unloaded_command_panics() {
    let mut table = Gl::new();
    table.load_all_functions(resolve);
    unsafe { table.glFinish() };
}

#[test]
fn test_enum_values() {
    assert_eq!(gl::Boolean::FALSE.0, 0);
    assert_eq!(gl::Boolean::TRUE.0, 1);
    assert_eq!(gl::ClearBufferMask::COLOR_BUFFER_BIT.0, 0x4000);
    assert_eq!(gl::FeedbackType::_2D.0, 0x0600);
    assert_eq!(gl::SpecialNumbers::INVALID_INDEX.0, u32::MAX);
}

#[test]
fn test_enum_duplicate_values_coexist() {
    assert_eq!(gl::SpecialNumbers::ZERO, gl::SpecialNumbers::NONE);
    assert_eq!(gl::AlphaFunction::NEVER.0, gl::DepthFunction::NEVER.0);
}

#[test]
fn test_enum_default_is_zero() {
    assert_eq!(gl::Boolean::default(), gl::Boolean::FALSE);
}
