use super::{
    body::RequestBody,
    error::{InvalidHeader, ResolveError, SerializeError},
    options::{RequestOption, RequestOptionKind},
    query::{ParamValue, QueryParameterSource},
    scalar::ScalarValue,
    serialize::{Parsable, RequestAdapter},
    template,
};
use assert_impl::assert_impl;
use http::{
    header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE},
    uri::Uri,
    Method,
};
use mime::{Mime, APPLICATION_OCTET_STREAM};
use std::collections::HashMap;

/// 原始 URL 的保留路径参数名称
///
/// 该路径参数存在且为单个字符串时，解析 URL 将直接使用它，跳过模板展开
pub const RAW_URL_KEY: &str = "request-raw-url";

const BASE_URL_KEY: &str = "baseurl";
const BASE_URL_TOKEN: &str = "{+baseurl}";

/// HTTP 请求描述信息
///
/// 单次 API 调用的可变值对象，
/// 由生成的客户端代码逐步填充 URL 模板、路径参数、查询参数、请求头、请求选项和请求体，
/// 最终由请求适配器读取并转换为真正的网络调用。
/// 每个实例只描述一次调用，解析 URL 是最后一次读取
#[derive(Debug, Default)]
pub struct RequestInformation {
    method: Method,
    url_template: Option<String>,
    path_parameters: HashMap<String, ParamValue>,
    query_parameters: HashMap<String, ParamValue>,
    headers: HeaderMap,
    options: HashMap<RequestOptionKind, RequestOption>,
    content: Option<RequestBody>,
    url: Option<Uri>,
}

impl RequestInformation {
    /// 创建 HTTP 请求描述信息
    #[inline]
    pub fn new(method: Method, url_template: impl Into<String>) -> Self {
        Self {
            method,
            url_template: Some(url_template.into()),
            ..Default::default()
        }
    }

    /// 获取请求 HTTP 方法
    #[inline]
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// 获取请求 HTTP 方法的可变引用
    #[inline]
    pub fn method_mut(&mut self) -> &mut Method {
        &mut self.method
    }

    /// 获取 URL 模板
    #[inline]
    pub fn url_template(&self) -> Option<&str> {
        self.url_template.as_deref()
    }

    /// 设置 URL 模板
    #[inline]
    pub fn set_url_template(&mut self, url_template: impl Into<String>) -> &mut Self {
        self.url_template = Some(url_template.into());
        self
    }

    /// 获取路径参数
    #[inline]
    pub fn path_parameters(&self) -> &HashMap<String, ParamValue> {
        &self.path_parameters
    }

    /// 插入路径参数
    ///
    /// 覆盖同名的路径参数，名称区分大小写
    #[inline]
    pub fn insert_path_parameter(&mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> &mut Self {
        self.path_parameters.insert(name.into(), value.into());
        self
    }

    /// 获取查询参数
    #[inline]
    pub fn query_parameters(&self) -> &HashMap<String, ParamValue> {
        &self.query_parameters
    }

    /// 根据查询参数来源批量添加查询参数
    ///
    /// 来源为 [`None`] 时不做任何事，
    /// 绑定表中取值为 [`None`] 的条目会被跳过并记录调试日志
    pub fn add_query_parameters(&mut self, source: Option<&(impl QueryParameterSource + ?Sized)>) -> &mut Self {
        let Some(source) = source else {
            return self;
        };
        for (name, value) in source.query_parameter_pairs() {
            match value {
                Some(value) => {
                    self.query_parameters.insert(name.into_owned(), value);
                }
                None => log::debug!("query parameter {} has no value, skipped", name),
            }
        }
        self
    }

    /// 添加查询参数
    ///
    /// 覆盖同名的查询参数
    #[inline]
    pub fn add_query_parameter(&mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> &mut Self {
        self.query_parameters.insert(name.into(), value.into());
        self
    }

    /// 移除查询参数
    ///
    /// 查询参数不存在时不做任何事
    #[inline]
    pub fn remove_query_parameter(&mut self, name: &str) -> &mut Self {
        self.query_parameters.remove(name);
        self
    }

    /// 获取请求 HTTP Headers
    #[inline]
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// 添加请求 HTTP 头
    ///
    /// 名称规范化为小写后存储，同名头（不区分大小写）后添加的生效
    pub fn add_header(&mut self, name: &str, value: &str) -> Result<&mut Self, InvalidHeader> {
        let name = HeaderName::from_bytes(name.as_bytes())?;
        let value = HeaderValue::from_str(value)?;
        self.headers.insert(name, value);
        Ok(self)
    }

    /// 批量添加请求 HTTP 头
    ///
    /// 逐个插入，同名头后添加的生效
    pub fn add_headers(&mut self, headers: &HeaderMap) -> &mut Self {
        for (name, value) in headers {
            self.headers.insert(name, value.clone());
        }
        self
    }

    /// 移除请求 HTTP 头
    ///
    /// 名称不区分大小写，HTTP 头不存在时不做任何事
    #[inline]
    pub fn remove_header(&mut self, name: &str) -> &mut Self {
        self.headers.remove(name);
        self
    }

    /// 获取请求选项
    ///
    /// 迭代顺序不确定
    #[inline]
    pub fn options(&self) -> impl Iterator<Item = &RequestOption> {
        self.options.values()
    }

    /// 获取指定种类的请求选项
    #[inline]
    pub fn option(&self, kind: RequestOptionKind) -> Option<&RequestOption> {
        self.options.get(&kind)
    }

    /// 批量添加请求选项
    ///
    /// 每种选项按种类唯一，同种类的选项后添加的生效
    pub fn add_options(&mut self, options: impl IntoIterator<Item = RequestOption>) -> &mut Self {
        for option in options {
            self.options.insert(option.kind(), option);
        }
        self
    }

    /// 按种类批量移除请求选项
    ///
    /// 该种类的选项不存在时不做任何事
    pub fn remove_options(&mut self, kinds: impl IntoIterator<Item = RequestOptionKind>) -> &mut Self {
        for kind in kinds {
            self.options.remove(&kind);
        }
        self
    }

    /// 获取请求体
    #[inline]
    pub fn content(&self) -> Option<&RequestBody> {
        self.content.as_ref()
    }

    /// 取出请求体
    #[inline]
    pub fn take_content(&mut self) -> Option<RequestBody> {
        self.content.take()
    }

    /// 获取显式设置的请求 URL
    #[inline]
    pub fn url(&self) -> Option<&Uri> {
        self.url.as_ref()
    }

    /// 显式设置请求 URL
    ///
    /// 同时清空路径参数和查询参数，
    /// 显式 URL 和模板参数两种表示方式互斥，不会合并
    pub fn set_url(&mut self, url: Uri) -> &mut Self {
        self.url = Some(url);
        self.path_parameters.clear();
        self.query_parameters.clear();
        self
    }

    /// 解析最终的请求 URL
    ///
    /// 按严格的优先级依次尝试：
    /// 显式设置的 URL 原样返回；
    /// 路径参数中存在 [`RAW_URL_KEY`] 的单个字符串时解析该字符串，
    /// 并将其固化为显式 URL（一次性的状态收拢，此后两个参数表被清空）；
    /// 否则以查询参数和路径参数的并集展开 URL 模板，同名时路径参数生效。
    /// 状态不变时重复调用返回相等的 URL
    pub fn resolve_url(&mut self) -> Result<Uri, ResolveError> {
        if let Some(url) = self.url.as_ref() {
            return Ok(url.clone());
        }
        let raw_url = self.path_parameters.get(RAW_URL_KEY).and_then(|value| match value {
            ParamValue::Single(raw_url) => Some(raw_url.clone()),
            ParamValue::List(_) => None,
        });
        if let Some(raw_url) = raw_url {
            let url = raw_url.parse::<Uri>()?;
            self.set_url(url.clone());
            return Ok(url);
        }
        let url_template = self.url_template.as_deref().ok_or(ResolveError::MissingUrlTemplate)?;
        if url_template.to_lowercase().contains(BASE_URL_TOKEN)
            && !self.path_parameters.contains_key(BASE_URL_KEY)
        {
            return Err(ResolveError::MissingBaseUrl);
        }
        let mut vars: HashMap<&str, &ParamValue> = self
            .query_parameters
            .iter()
            .map(|(name, value)| (name.as_str(), value))
            .collect();
        vars.extend(
            self.path_parameters
                .iter()
                .map(|(name, value)| (name.as_str(), value)),
        );
        let expanded = template::expand(url_template, &vars)?;
        Ok(expanded.parse::<Uri>()?)
    }

    /// 将二进制流设置为请求体
    ///
    /// 同时将内容类型强制设置为 `application/octet-stream`
    pub fn set_stream_content(&mut self, content: impl Into<RequestBody>) -> &mut Self {
        self.content = Some(content.into());
        self.set_content_type(&APPLICATION_OCTET_STREAM);
        self
    }

    /// 将数据模型序列化为请求体
    ///
    /// 从请求适配器获取该内容类型的序列化器，写入完成后释放。
    /// 单个数据模型按对象写入，多个按对象集合写入。
    /// 序列化失败时请求体和内容类型均保持不变
    pub fn set_parsable_content(
        &mut self,
        adapter: &(impl RequestAdapter + ?Sized),
        content_type: &Mime,
        values: &[&dyn Parsable],
    ) -> Result<&mut Self, SerializeError> {
        if values.is_empty() {
            return Err(SerializeError::EmptyValues);
        }
        let mut writer = adapter.serialization_writer_factory().serialization_writer(content_type)?;
        if let [value] = values {
            writer.write_object_value(None, *value)?;
        } else {
            writer.write_collection_of_object_values(None, values)?;
        }
        let content = writer.serialized_content()?;
        self.content = Some(content);
        self.set_content_type(content_type);
        Ok(self)
    }

    /// 将标量值序列化为请求体
    ///
    /// 从请求适配器获取该内容类型的序列化器，写入完成后释放。
    /// 单个标量值按类型分派到对应的写入方法，多个按标量集合写入。
    /// 取值无法归入受支持的标量类型闭集时在获取序列化器之前就返回错误。
    /// 序列化失败时请求体和内容类型均保持不变
    pub fn set_scalar_content<T>(
        &mut self,
        adapter: &(impl RequestAdapter + ?Sized),
        content_type: &Mime,
        values: impl IntoIterator<Item = T>,
    ) -> Result<&mut Self, SerializeError>
    where
        T: TryInto<ScalarValue>,
        T::Error: Into<SerializeError>,
    {
        let values = values
            .into_iter()
            .map(|value| value.try_into().map_err(Into::into))
            .collect::<Result<Vec<_>, SerializeError>>()?;
        if values.is_empty() {
            return Err(SerializeError::EmptyValues);
        }
        let mut writer = adapter.serialization_writer_factory().serialization_writer(content_type)?;
        if let [value] = values.as_slice() {
            value.write_to(writer.as_mut(), None)?;
        } else {
            writer.write_collection_of_primitive_values(None, &values)?;
        }
        let content = writer.serialized_content()?;
        self.content = Some(content);
        self.set_content_type(content_type);
        Ok(self)
    }

    fn set_content_type(&mut self, content_type: &Mime) {
        self.headers
            .insert(CONTENT_TYPE, HeaderValue::from_str(content_type.as_ref()).unwrap());
    }

    #[allow(dead_code)]
    fn ignore() {
        assert_impl!(Send: Self);
        assert_impl!(Sync: Self);
    }
}
