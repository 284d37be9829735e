use super::{body::RequestBody, error::SerializeError, scalar::ScalarValue};
use auto_impl::auto_impl;
use bigdecimal::BigDecimal;
use chrono::{DateTime, Duration, FixedOffset, NaiveDate, NaiveTime};
use mime::Mime;
use std::io::Result as IoResult;
use uuid::Uuid;

/// 可序列化的数据模型
///
/// 实现该接口，数据模型即可通过序列化器写出自身
#[auto_impl(&, &mut, Box)]
pub trait Parsable {
    /// 将数据模型写入序列化器
    fn serialize(&self, writer: &mut dyn SerializationWriter) -> IoResult<()>;
}

/// 请求体序列化器
///
/// 每种内容类型各有一个实现，为每种受支持的标量类型提供对应的写入方法。
/// 序列化器总是在单次请求体构建中独占使用，
/// 写入完成后由 [`serialized_content`](SerializationWriter::serialized_content) 消费并释放
pub trait SerializationWriter {
    /// 写入字符串
    fn write_string_value(&mut self, key: Option<&str>, value: &str) -> IoResult<()>;

    /// 写入布尔值
    fn write_bool_value(&mut self, key: Option<&str>, value: bool) -> IoResult<()>;

    /// 写入 8 位有符号整数
    fn write_byte_value(&mut self, key: Option<&str>, value: i8) -> IoResult<()>;

    /// 写入 16 位有符号整数
    fn write_short_value(&mut self, key: Option<&str>, value: i16) -> IoResult<()>;

    /// 写入任意精度十进制数
    fn write_decimal_value(&mut self, key: Option<&str>, value: &BigDecimal) -> IoResult<()>;

    /// 写入浮点数
    fn write_float_value(&mut self, key: Option<&str>, value: f64) -> IoResult<()>;

    /// 写入 64 位有符号整数
    fn write_long_value(&mut self, key: Option<&str>, value: i64) -> IoResult<()>;

    /// 写入 32 位有符号整数
    fn write_int_value(&mut self, key: Option<&str>, value: i32) -> IoResult<()>;

    /// 写入 UUID
    fn write_uuid_value(&mut self, key: Option<&str>, value: Uuid) -> IoResult<()>;

    /// 写入带时区偏移的日期时间
    fn write_date_time_value(&mut self, key: Option<&str>, value: DateTime<FixedOffset>) -> IoResult<()>;

    /// 写入日期
    fn write_date_value(&mut self, key: Option<&str>, value: NaiveDate) -> IoResult<()>;

    /// 写入时间
    fn write_time_value(&mut self, key: Option<&str>, value: NaiveTime) -> IoResult<()>;

    /// 写入时长
    fn write_duration_value(&mut self, key: Option<&str>, value: Duration) -> IoResult<()>;

    /// 写入数据模型
    fn write_object_value(&mut self, key: Option<&str>, value: &dyn Parsable) -> IoResult<()>;

    /// 写入数据模型集合
    fn write_collection_of_object_values(&mut self, key: Option<&str>, values: &[&dyn Parsable]) -> IoResult<()>;

    /// 写入标量值集合
    fn write_collection_of_primitive_values(&mut self, key: Option<&str>, values: &[ScalarValue]) -> IoResult<()>;

    /// 取出序列化结果并释放序列化器
    fn serialized_content(self: Box<Self>) -> IoResult<RequestBody>;
}

/// 请求体序列化器工厂
///
/// 根据内容类型提供对应的序列化器
#[auto_impl(&, &mut, Box, Rc, Arc)]
pub trait SerializationWriterFactory {
    /// 获取指定内容类型的序列化器
    fn serialization_writer(&self, content_type: &Mime) -> Result<Box<dyn SerializationWriter>, SerializeError>;
}

/// 请求适配器
///
/// 请求描述信息的消费方，
/// 负责提供序列化器工厂并将解析后的请求转换为真正的网络调用
#[auto_impl(&, &mut, Box, Rc, Arc)]
pub trait RequestAdapter {
    /// 获取请求体序列化器工厂
    fn serialization_writer_factory(&self) -> &dyn SerializationWriterFactory;
}
