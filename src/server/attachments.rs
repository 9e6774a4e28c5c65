//! Attachment helpers: MIME inference and download destination resolution.

use std::path::{Path, PathBuf};

use percent_encoding::percent_decode_str;
use url::Url;

/// Fallback file name when nothing else identifies the attachment.
pub const DEFAULT_FILE_NAME: &str = "attachment";

/// Infer a MIME type from the file extension of a URL or path, falling back
/// to `default` for unrecognized extensions.
pub fn mime_type_from_url(url: &str, default: &str) -> String {
    let name = file_name_from_url(url).unwrap_or_else(|| url.to_string());
    let extension = name.rsplit('.').next().map(str::to_lowercase);

    let mime = match extension.as_deref() {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("svg") => "image/svg+xml",
        Some("bmp") => "image/bmp",
        Some("tiff") => "image/tiff",
        Some("ico") => "image/x-icon",
        Some("heic") => "image/heic",
        Some("pdf") => "application/pdf",
        Some("txt") => "text/plain",
        Some("csv") => "text/csv",
        Some("json") => "application/json",
        Some("md") => "text/markdown",
        Some("doc") => "application/msword",
        Some("docx") => {
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
        }
        Some("xls") => "application/vnd.ms-excel",
        Some("xlsx") => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        Some("ppt") => "application/vnd.ms-powerpoint",
        Some("pptx") => {
            "application/vnd.openxmlformats-officedocument.presentationml.presentation"
        }
        Some("zip") => "application/zip",
        Some("rar") => "application/vnd.rar",
        Some("7z") => "application/x-7z-compressed",
        Some("tar") => "application/x-tar",
        Some("gz") => "application/gzip",
        Some("mp4") => "video/mp4",
        Some("mov") => "video/quicktime",
        Some("avi") => "video/x-msvideo",
        Some("mp3") => "audio/mpeg",
        Some("wav") => "audio/wav",
        Some("ogg") => "audio/ogg",
        _ => return default.to_string(),
    };
    mime.to_string()
}

/// File name taken from the last path segment of a URL, percent-decoded.
pub fn file_name_from_url(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let segment = parsed
        .path_segments()?
        .filter(|segment| !segment.is_empty())
        .next_back()?;
    let decoded = percent_decode_str(segment).decode_utf8().ok()?;
    let decoded = decoded.trim();
    if decoded.is_empty() {
        None
    } else {
        Some(decoded.to_string())
    }
}

/// Pick the saved file name for a download: caller override, then the name
/// the server reported, then the URL, then a literal fallback.
pub fn infer_file_name(
    provided: Option<&str>,
    detected: Option<&str>,
    url: &str,
) -> String {
    provided
        .map(str::to_string)
        .or_else(|| detected.map(str::to_string))
        .or_else(|| file_name_from_url(url))
        .unwrap_or_else(|| DEFAULT_FILE_NAME.to_string())
}

/// Resolve a caller-supplied destination into a concrete file path.
///
/// A destination ending in a path separator, or naming an existing
/// directory, is treated as a directory to place `file_name` in; anything
/// else is used verbatim as the target file.
pub fn resolve_destination(destination: &str, file_name: &str) -> PathBuf {
    let looks_like_dir = destination.ends_with('/')
        || destination.ends_with(std::path::MAIN_SEPARATOR)
        || Path::new(destination).is_dir();

    if looks_like_dir {
        Path::new(destination).join(file_name)
    } else {
        PathBuf::from(destination)
    }
}
