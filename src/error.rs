use http::{
    header::{InvalidHeaderName, InvalidHeaderValue},
    uri::InvalidUri,
};
use mime::Mime;
use std::{convert::Infallible, io::Error as IoError};
use thiserror::Error;

/// 非法的 HTTP 头错误
///
/// HTTP 头名称或取值不符合 HTTP 规范时返回该错误
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum InvalidHeader {
    /// 非法的 HTTP 头名称
    #[error(transparent)]
    Name(#[from] InvalidHeaderName),

    /// 非法的 HTTP 头取值
    #[error(transparent)]
    Value(#[from] InvalidHeaderValue),
}

/// URL 解析错误
///
/// 在根据 URL 模板和参数解析最终请求 URL 时可能发生的错误
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ResolveError {
    /// URL 模板未设置
    #[error("url template is not set")]
    MissingUrlTemplate,

    /// 路径参数缺少 `baseurl`
    #[error("path parameters must contain a value for \"baseurl\" for the url to be built")]
    MissingBaseUrl,

    /// URL 模板中的表达式未闭合
    #[error("unterminated expression in url template")]
    UnterminatedExpression,

    /// URL 模板中含有不支持的操作符
    #[error("unsupported operator {0:?} in url template")]
    UnsupportedOperator(char),

    /// 解析出的 URL 非法
    #[error("invalid url")]
    InvalidUrl(#[from] InvalidUri),
}

/// 不支持的标量类型错误
///
/// 动态取值无法归入受支持的标量类型闭集时返回该错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unsupported scalar value type {type_name}")]
pub struct UnsupportedScalarTypeError {
    type_name: &'static str,
}

impl UnsupportedScalarTypeError {
    pub(crate) fn new(type_name: &'static str) -> Self {
        Self { type_name }
    }

    /// 获取无法归类的取值类型名称
    #[inline]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }
}

/// 请求体序列化错误
///
/// 在通过序列化器构建请求体时可能发生的错误
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum SerializeError {
    /// 没有提供任何待序列化的值
    #[error("values cannot be empty")]
    EmptyValues,

    /// 取值类型不在受支持的标量类型闭集内
    #[error(transparent)]
    UnsupportedType(#[from] UnsupportedScalarTypeError),

    /// 该内容类型没有注册对应的序列化器
    #[error("no serialization writer is registered for content type {0}")]
    NoWriterForContentType(Mime),

    /// 序列化器写入失败
    #[error("could not serialize payload")]
    Write(#[from] IoError),
}

impl From<Infallible> for SerializeError {
    #[inline]
    fn from(err: Infallible) -> Self {
        match err {}
    }
}
