use assert_impl::assert_impl;
use std::{
    fmt::Debug,
    io::{Cursor, Read, Result as IoResult},
};

trait ReadDebug: Read + Debug + Send + Sync {}
impl<T: Read + Debug + Send + Sync> ReadDebug for T {}

/// HTTP 请求体
///
/// 既可以是内存中的二进制数据，也可以是声明了长度的输入流
#[derive(Debug)]
pub struct RequestBody(RequestBodyInner);

#[derive(Debug)]
enum RequestBodyInner {
    Reader { reader: Box<dyn ReadDebug>, size: u64 },
    Bytes(Cursor<Vec<u8>>),
}

impl RequestBody {
    /// 通过输入流创建 HTTP 请求体
    #[inline]
    pub fn from_reader(reader: impl Read + Debug + Send + Sync + 'static, size: u64) -> Self {
        Self(RequestBodyInner::Reader {
            reader: Box::new(reader),
            size,
        })
    }

    /// 通过二进制数据创建 HTTP 请求体
    #[inline]
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self(RequestBodyInner::Bytes(Cursor::new(bytes)))
    }

    /// 获取请求体大小
    ///
    /// 单位为字节
    #[inline]
    pub fn size(&self) -> u64 {
        match &self.0 {
            RequestBodyInner::Reader { size, .. } => *size,
            RequestBodyInner::Bytes(bytes) => bytes.get_ref().len() as u64,
        }
    }

    /// 获取内存中的二进制数据
    ///
    /// 如果请求体是输入流则返回 [`None`]
    #[inline]
    pub fn bytes(&self) -> Option<&[u8]> {
        match &self.0 {
            RequestBodyInner::Reader { .. } => None,
            RequestBodyInner::Bytes(bytes) => Some(bytes.get_ref()),
        }
    }

    #[allow(dead_code)]
    fn ignore() {
        assert_impl!(Send: Self);
        assert_impl!(Sync: Self);
    }
}

impl Default for RequestBody {
    #[inline]
    fn default() -> Self {
        Self::from_bytes(Default::default())
    }
}

impl Read for RequestBody {
    #[inline]
    fn read(&mut self, buf: &mut [u8]) -> IoResult<usize> {
        match &mut self.0 {
            RequestBodyInner::Reader { reader, .. } => reader.read(buf),
            RequestBodyInner::Bytes(bytes) => bytes.read(buf),
        }
    }
}

impl From<Vec<u8>> for RequestBody {
    #[inline]
    fn from(body: Vec<u8>) -> Self {
        Self::from_bytes(body)
    }
}

impl From<String> for RequestBody {
    #[inline]
    fn from(body: String) -> Self {
        Self::from_bytes(body.into_bytes())
    }
}

impl From<&[u8]> for RequestBody {
    #[inline]
    fn from(body: &[u8]) -> Self {
        Self::from_bytes(body.to_owned())
    }
}

impl From<&str> for RequestBody {
    #[inline]
    fn from(body: &str) -> Self {
        Self::from_bytes(body.as_bytes().to_owned())
    }
}
