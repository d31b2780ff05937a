//! Error Kind
//!
//! Failure classes the HTTP surface distinguishes. Each one maps to exactly
//! one status code.

use std::fmt;

/// エラー分類
///
/// サービスが実際に返すステータスのみを持ちます。
///
/// ```rust
/// use kernel::error::kind::ErrorKind;
///
/// assert_eq!(ErrorKind::Conflict.status_code(), 409);
/// assert!(ErrorKind::InternalServerError.is_server_error());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ErrorKind {
    /// 入力が欠落または不正
    BadRequest,
    /// 認証情報が一致しない
    Unauthorized,
    /// レコードが存在しない
    NotFound,
    /// 処理が制限時間内に終わらなかった
    RequestTimeout,
    /// 一意制約と競合
    Conflict,
    /// ストアまたは実行時エラー
    InternalServerError,
}

impl ErrorKind {
    #[inline]
    pub const fn status_code(self) -> u16 {
        match self {
            Self::BadRequest => 400,
            Self::Unauthorized => 401,
            Self::NotFound => 404,
            Self::RequestTimeout => 408,
            Self::Conflict => 409,
            Self::InternalServerError => 500,
        }
    }

    /// 標準の理由フレーズ
    pub const fn reason(self) -> &'static str {
        match self {
            Self::BadRequest => "Bad Request",
            Self::Unauthorized => "Unauthorized",
            Self::NotFound => "Not Found",
            Self::RequestTimeout => "Request Timeout",
            Self::Conflict => "Conflict",
            Self::InternalServerError => "Internal Server Error",
        }
    }

    /// 5xx 系かどうか
    ///
    /// サーバーエラーのみ原因をクライアントに返します。
    #[inline]
    pub const fn is_server_error(self) -> bool {
        self.status_code() >= 500
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.reason())
    }
}
