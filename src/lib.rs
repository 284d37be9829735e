#![deny(
    absolute_paths_not_starting_with_crate,
    anonymous_parameters,
    explicit_outlives_requirements,
    keyword_idents,
    macro_use_extern_crate,
    meta_variable_misuse,
    non_ascii_idents,
    trivial_casts,
    trivial_numeric_casts,
    unreachable_pub,
    unsafe_code,
    unstable_features,
    unused_extern_crates,
    unused_import_braces,
    unused_lifetimes,
    unused_qualifications
)]

//! 为生成的 API 客户端代码提供 HTTP 请求抽象
//!
//! 核心是 [`RequestInformation`]：单次 API 调用的请求描述信息，
//! 由生成的客户端代码填充 URL 模板和各类参数后，
//! 交给实现了 [`RequestAdapter`] 的传输层转换为真正的网络调用。
//! 本库自身不进行任何网络 I/O，
//! 具体的序列化格式由按内容类型注册的 [`SerializationWriter`] 实现提供

mod body;
mod error;
mod options;
mod query;
mod request;
mod scalar;
mod serialize;
mod template;

pub use http::{
    header::{HeaderMap, HeaderName, HeaderValue},
    uri::Uri,
    Method,
};
pub use mime::Mime;

pub use body::RequestBody;
pub use error::{InvalidHeader, ResolveError, SerializeError, UnsupportedScalarTypeError};
pub use options::{Idempotent, RequestOption, RequestOptionKind};
pub use query::{ParamValue, QueryPairKey, QueryParameterSource};
pub use request::{RequestInformation, RAW_URL_KEY};
pub use scalar::ScalarValue;
pub use serialize::{Parsable, RequestAdapter, SerializationWriter, SerializationWriterFactory};

pub mod preclude {
    pub use super::{Parsable, QueryParameterSource, RequestAdapter, SerializationWriter, SerializationWriterFactory};
}
