#![warn(unsafe_op_in_unsafe_fn, missing_debug_implementations)]

//! A C-ABI bridge exposing the decoding pipeline to a host runtime,
//! typically a WebAssembly embedder.
//!
//! Every operation takes a pointer/length pair into host-supplied
//! memory and returns a status code; output buffers are allocated
//! here, handed to the host, and released through [`dcmview_free`].
//! On failure, a thread-local slot keeps a human-readable rendering
//! of the error chain, retrievable with [`dcmview_last_error`].
//!
//! The safe functions [`extract_metadata`], [`get_dimensions`] and
//! [`decode_to_rgb`] carry the same semantics for Rust callers.

use std::cell::RefCell;
use std::error::Error as StdError;
use std::slice;

use dcmview_json::MetadataRecord;
use dcmview_parser::DicomFile;
use dcmview_pixeldata::{attribute, DecodedPixelData};

/// Status code of a successful bridge call.
pub const STATUS_OK: i32 = 0;
/// Status code of a failed bridge call.
pub const STATUS_ERROR: i32 = 1;

thread_local! {
    static LAST_ERROR: RefCell<String> = const { RefCell::new(String::new()) };
}

fn set_last_error(message: String) {
    LAST_ERROR.with(|slot| *slot.borrow_mut() = message);
}

// Render an error with its full source chain,
// so the host sees the root cause without structured kinds.
fn render_error(error: &dyn StdError) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

/// Project the clinical metadata of a DICOM file to JSON.
pub fn extract_metadata(data: &[u8]) -> Result<String, String> {
    let file = DicomFile::parse(data).map_err(|e| render_error(&e))?;
    Ok(MetadataRecord::from_dataset(&file.dataset).to_json_string())
}

/// Fetch the (width, height) of the image in a DICOM file.
pub fn get_dimensions(data: &[u8]) -> Result<(u16, u16), String> {
    let file = DicomFile::parse(data).map_err(|e| render_error(&e))?;
    let columns = attribute::columns(&file.dataset).map_err(|e| render_error(&e))?;
    let rows = attribute::rows(&file.dataset).map_err(|e| render_error(&e))?;
    Ok((columns, rows))
}

/// Decode the pixel data of a DICOM file to 8-bit interleaved RGB.
/// Returns the samples and the (width, height) of the raster.
pub fn decode_to_rgb(data: &[u8]) -> Result<(Vec<u8>, u16, u16), String> {
    let file = DicomFile::parse(data).map_err(|e| render_error(&e))?;
    let decoded = DecodedPixelData::decode(&file).map_err(|e| render_error(&e))?;
    Ok((decoded.to_rgb8(), decoded.columns, decoded.rows))
}

// Hand a buffer to the host. The allocation is shrunk to its exact
// length so that `dcmview_free(ptr, len)` can reconstruct it.
unsafe fn export_buffer(bytes: Vec<u8>, out_ptr: *mut *mut u8, out_len: *mut usize) {
    let boxed = bytes.into_boxed_slice();
    let len = boxed.len();
    let ptr = Box::into_raw(boxed) as *mut u8;
    unsafe {
        *out_ptr = ptr;
        *out_len = len;
    }
}

/// Allocate `len` bytes of zeroed memory for the host to fill.
///
/// # Safety
///
/// The returned buffer must be released with [`dcmview_free`]
/// using the same length.
#[no_mangle]
pub extern "C" fn dcmview_alloc(len: usize) -> *mut u8 {
    let boxed = vec![0u8; len].into_boxed_slice();
    Box::into_raw(boxed) as *mut u8
}

/// Release a buffer previously returned by this library.
///
/// # Safety
///
/// `ptr` must come from [`dcmview_alloc`] or an output parameter
/// of a bridge call, and `len` must be the length it was handed
/// out with. A buffer must be freed at most once.
#[no_mangle]
pub unsafe extern "C" fn dcmview_free(ptr: *mut u8, len: usize) {
    if !ptr.is_null() {
        unsafe {
            drop(Vec::from_raw_parts(ptr, len, len));
        }
    }
}

/// Extract the metadata of the DICOM file at `data..data+len`
/// as JSON bytes.
///
/// # Safety
///
/// `data` must point to `len` readable bytes; `out_ptr` and
/// `out_len` must be valid for writes.
#[no_mangle]
pub unsafe extern "C" fn dcmview_extract_metadata(
    data: *const u8,
    len: usize,
    out_ptr: *mut *mut u8,
    out_len: *mut usize,
) -> i32 {
    let input = unsafe { slice::from_raw_parts(data, len) };
    match extract_metadata(input) {
        Ok(json) => {
            unsafe { export_buffer(json.into_bytes(), out_ptr, out_len) };
            STATUS_OK
        }
        Err(message) => {
            set_last_error(message);
            STATUS_ERROR
        }
    }
}

/// Fetch the image dimensions of the DICOM file at `data..data+len`.
///
/// # Safety
///
/// `data` must point to `len` readable bytes; `out_width` and
/// `out_height` must be valid for writes.
#[no_mangle]
pub unsafe extern "C" fn dcmview_get_dimensions(
    data: *const u8,
    len: usize,
    out_width: *mut u32,
    out_height: *mut u32,
) -> i32 {
    let input = unsafe { slice::from_raw_parts(data, len) };
    match get_dimensions(input) {
        Ok((width, height)) => {
            unsafe {
                *out_width = u32::from(width);
                *out_height = u32::from(height);
            }
            STATUS_OK
        }
        Err(message) => {
            set_last_error(message);
            STATUS_ERROR
        }
    }
}

/// Decode the DICOM file at `data..data+len` to 8-bit RGB.
///
/// # Safety
///
/// `data` must point to `len` readable bytes; all output pointers
/// must be valid for writes.
#[no_mangle]
pub unsafe extern "C" fn dcmview_decode_to_rgb(
    data: *const u8,
    len: usize,
    out_ptr: *mut *mut u8,
    out_len: *mut usize,
    out_width: *mut u32,
    out_height: *mut u32,
) -> i32 {
    let input = unsafe { slice::from_raw_parts(data, len) };
    match decode_to_rgb(input) {
        Ok((rgb, width, height)) => {
            unsafe {
                export_buffer(rgb, out_ptr, out_len);
                *out_width = u32::from(width);
                *out_height = u32::from(height);
            }
            STATUS_OK
        }
        Err(message) => {
            set_last_error(message);
            STATUS_ERROR
        }
    }
}

/// Fetch the message of the most recent failure on this thread
/// as UTF-8 bytes.
///
/// # Safety
///
/// `out_ptr` and `out_len` must be valid for writes.
#[no_mangle]
pub unsafe extern "C" fn dcmview_last_error(out_ptr: *mut *mut u8, out_len: *mut usize) -> i32 {
    let message = LAST_ERROR.with(|slot| slot.borrow().clone());
    unsafe { export_buffer(message.into_bytes(), out_ptr, out_len) };
    STATUS_OK
}
