//! 文件类型识别
//!
//! 上传时同时校验扩展名与文件头，避免伪造扩展名的文件进入对象存储。

/// 文件头签名
enum Signature {
    /// 以固定字节序列开头
    Prefix(&'static [u8]),
    /// 纯文本，不检查文件头，但拒绝含 NUL 的内容
    Text,
}

struct FileKind {
    extensions: &'static [&'static str],
    content_type: &'static str,
    signature: Signature,
}

const OLE: &[u8] = &[0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1];
const ZIP: &[u8] = &[0x50, 0x4B, 0x03, 0x04];

static KINDS: &[FileKind] = &[
    FileKind {
        extensions: &[".pdf"],
        content_type: "application/pdf",
        signature: Signature::Prefix(b"%PDF"),
    },
    FileKind {
        extensions: &[".png"],
        content_type: "image/png",
        signature: Signature::Prefix(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]),
    },
    FileKind {
        extensions: &[".jpg", ".jpeg"],
        content_type: "image/jpeg",
        signature: Signature::Prefix(&[0xFF, 0xD8, 0xFF]),
    },
    FileKind {
        extensions: &[".doc"],
        content_type: "application/msword",
        signature: Signature::Prefix(OLE),
    },
    FileKind {
        extensions: &[".xls"],
        content_type: "application/vnd.ms-excel",
        signature: Signature::Prefix(OLE),
    },
    FileKind {
        extensions: &[".ppt"],
        content_type: "application/vnd.ms-powerpoint",
        signature: Signature::Prefix(OLE),
    },
    FileKind {
        extensions: &[".docx"],
        content_type: "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        signature: Signature::Prefix(ZIP),
    },
    FileKind {
        extensions: &[".xlsx"],
        content_type: "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        signature: Signature::Prefix(ZIP),
    },
    FileKind {
        extensions: &[".pptx"],
        content_type: "application/vnd.openxmlformats-officedocument.presentationml.presentation",
        signature: Signature::Prefix(ZIP),
    },
    FileKind {
        extensions: &[".zip"],
        content_type: "application/zip",
        signature: Signature::Prefix(ZIP),
    },
    FileKind {
        extensions: &[".txt"],
        content_type: "text/plain; charset=utf-8",
        signature: Signature::Text,
    },
    FileKind {
        extensions: &[".md"],
        content_type: "text/markdown; charset=utf-8",
        signature: Signature::Text,
    },
];

fn lookup(extension: &str) -> Option<&'static FileKind> {
    let ext = extension.to_ascii_lowercase();
    KINDS.iter().find(|k| k.extensions.contains(&ext.as_str()))
}

/// 验证文件头是否与扩展名（含点号，如 ".png"）匹配，未知扩展名一律拒绝
pub fn validate_magic_bytes(data: &[u8], extension: &str) -> bool {
    if data.is_empty() {
        return false;
    }
    match lookup(extension).map(|k| &k.signature) {
        Some(Signature::Prefix(prefix)) => data.starts_with(prefix),
        Some(Signature::Text) => !data.contains(&0),
        None => false,
    }
}

/// 按扩展名推断 Content-Type
pub fn content_type_for(extension: &str) -> &'static str {
    lookup(extension)
        .map(|k| k.content_type)
        .unwrap_or("application/octet-stream")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_png_magic() {
        let png_header = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
        assert!(validate_magic_bytes(&png_header, ".png"));
        assert!(validate_magic_bytes(&png_header, ".PNG"));
        assert!(!validate_magic_bytes(&png_header, ".jpg"));
    }

    #[test]
    fn test_office_formats_share_containers() {
        assert!(validate_magic_bytes(&[0x50, 0x4B, 0x03, 0x04, 0x14], ".docx"));
        assert!(validate_magic_bytes(&[0x50, 0x4B, 0x03, 0x04, 0x14], ".zip"));
        assert!(validate_magic_bytes(OLE, ".ppt"));
        assert!(!validate_magic_bytes(b"%PDF-1.7", ".docx"));
    }

    #[test]
    fn test_text_rejects_binary() {
        assert!(validate_magic_bytes(b"# Notes\nhello", ".md"));
        assert!(!validate_magic_bytes(&[0x41, 0x00, 0x42], ".txt"));
    }

    #[test]
    fn test_empty_and_unknown() {
        assert!(!validate_magic_bytes(&[], ".pdf"));
        assert!(!validate_magic_bytes(b"MZ\x90\x00", ".exe"));
    }

    #[test]
    fn test_content_type_lookup() {
        assert_eq!(content_type_for(".PDF"), "application/pdf");
        assert_eq!(content_type_for(".bin"), "application/octet-stream");
    }
}
