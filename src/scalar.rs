use super::{error::UnsupportedScalarTypeError, serialize::SerializationWriter};
use bigdecimal::BigDecimal;
use chrono::{DateTime, Duration, FixedOffset, NaiveDate, NaiveTime};
use serde_json::Value as JsonValue;
use std::{
    fmt::{self, Display},
    io::Result as IoResult,
};
use uuid::Uuid;

/// 标量值
///
/// 受支持的请求体标量类型闭集，
/// 序列化时按类型分派到序列化器的对应写入方法
#[derive(Clone, Debug, PartialEq)]
pub enum ScalarValue {
    /// 字符串
    String(String),
    /// 布尔值
    Bool(bool),
    /// 8 位有符号整数
    Byte(i8),
    /// 16 位有符号整数
    Short(i16),
    /// 任意精度十进制数
    Decimal(BigDecimal),
    /// 浮点数
    Float(f64),
    /// 64 位有符号整数
    Long(i64),
    /// 32 位有符号整数
    Int(i32),
    /// UUID
    Uuid(Uuid),
    /// 带时区偏移的日期时间
    DateTime(DateTime<FixedOffset>),
    /// 日期
    Date(NaiveDate),
    /// 时间
    Time(NaiveTime),
    /// 时长
    Duration(Duration),
}

impl ScalarValue {
    /// 将标量值写入序列化器
    ///
    /// 按标量类型分派到序列化器的对应写入方法
    pub fn write_to(&self, writer: &mut dyn SerializationWriter, key: Option<&str>) -> IoResult<()> {
        match self {
            Self::String(value) => writer.write_string_value(key, value),
            Self::Bool(value) => writer.write_bool_value(key, *value),
            Self::Byte(value) => writer.write_byte_value(key, *value),
            Self::Short(value) => writer.write_short_value(key, *value),
            Self::Decimal(value) => writer.write_decimal_value(key, value),
            Self::Float(value) => writer.write_float_value(key, *value),
            Self::Long(value) => writer.write_long_value(key, *value),
            Self::Int(value) => writer.write_int_value(key, *value),
            Self::Uuid(value) => writer.write_uuid_value(key, *value),
            Self::DateTime(value) => writer.write_date_time_value(key, *value),
            Self::Date(value) => writer.write_date_value(key, *value),
            Self::Time(value) => writer.write_time_value(key, *value),
            Self::Duration(value) => writer.write_duration_value(key, *value),
        }
    }
}

impl Display for ScalarValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(value) => f.write_str(value),
            Self::Bool(value) => write!(f, "{value}"),
            Self::Byte(value) => write!(f, "{value}"),
            Self::Short(value) => write!(f, "{value}"),
            Self::Decimal(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value}"),
            Self::Long(value) => write!(f, "{value}"),
            Self::Int(value) => write!(f, "{value}"),
            Self::Uuid(value) => write!(f, "{value}"),
            Self::DateTime(value) => f.write_str(&value.to_rfc3339()),
            Self::Date(value) => write!(f, "{value}"),
            Self::Time(value) => write!(f, "{value}"),
            Self::Duration(value) => fmt_iso8601_duration(f, *value),
        }
    }
}

// ISO 8601 时长格式，如 P1DT2H3M4S
fn fmt_iso8601_duration(f: &mut fmt::Formatter<'_>, duration: Duration) -> fmt::Result {
    let mut secs = duration.num_seconds();
    if secs == 0 {
        return f.write_str("PT0S");
    }
    if secs < 0 {
        f.write_str("-")?;
        secs = -secs;
    }
    f.write_str("P")?;
    let days = secs / 86_400;
    let hours = secs % 86_400 / 3_600;
    let minutes = secs % 3_600 / 60;
    let seconds = secs % 60;
    if days > 0 {
        write!(f, "{days}D")?;
    }
    if hours > 0 || minutes > 0 || seconds > 0 {
        f.write_str("T")?;
        if hours > 0 {
            write!(f, "{hours}H")?;
        }
        if minutes > 0 {
            write!(f, "{minutes}M")?;
        }
        if seconds > 0 {
            write!(f, "{seconds}S")?;
        }
    }
    Ok(())
}

macro_rules! impl_from_for_scalar_value {
    ($($source:ty => $variant:ident,)*) => {
        $(
            impl From<$source> for ScalarValue {
                #[inline]
                fn from(value: $source) -> Self {
                    Self::$variant(value.into())
                }
            }
        )*
    };
}

impl_from_for_scalar_value! {
    String => String,
    &str => String,
    bool => Bool,
    i8 => Byte,
    i16 => Short,
    BigDecimal => Decimal,
    f32 => Float,
    f64 => Float,
    i64 => Long,
    i32 => Int,
    Uuid => Uuid,
    DateTime<FixedOffset> => DateTime,
    NaiveDate => Date,
    NaiveTime => Time,
    Duration => Duration,
}

impl TryFrom<JsonValue> for ScalarValue {
    type Error = UnsupportedScalarTypeError;

    fn try_from(value: JsonValue) -> Result<Self, Self::Error> {
        match value {
            JsonValue::String(value) => Ok(Self::String(value)),
            JsonValue::Bool(value) => Ok(Self::Bool(value)),
            JsonValue::Number(number) => {
                if let Some(value) = number.as_i64() {
                    Ok(Self::Long(value))
                } else if let Some(value) = number.as_u64() {
                    Ok(Self::Decimal(BigDecimal::from(value)))
                } else if let Some(value) = number.as_f64() {
                    Ok(Self::Float(value))
                } else {
                    Err(UnsupportedScalarTypeError::new("number"))
                }
            }
            JsonValue::Null => Err(UnsupportedScalarTypeError::new("null")),
            JsonValue::Array(_) => Err(UnsupportedScalarTypeError::new("array")),
            JsonValue::Object(_) => Err(UnsupportedScalarTypeError::new("object")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::{error::Error, result::Result};

    #[test]
    fn test_from_json_value() -> Result<(), Box<dyn Error>> {
        assert_eq!(
            ScalarValue::try_from(json!("text"))?,
            ScalarValue::String("text".to_owned())
        );
        assert_eq!(ScalarValue::try_from(json!(true))?, ScalarValue::Bool(true));
        assert_eq!(ScalarValue::try_from(json!(-42))?, ScalarValue::Long(-42));
        assert_eq!(
            ScalarValue::try_from(json!(u64::MAX))?,
            ScalarValue::Decimal(BigDecimal::from(u64::MAX))
        );
        assert_eq!(ScalarValue::try_from(json!(1.5))?, ScalarValue::Float(1.5));
        Ok(())
    }

    #[test]
    fn test_from_unsupported_json_value() {
        assert_eq!(
            ScalarValue::try_from(JsonValue::Null).unwrap_err().type_name(),
            "null"
        );
        assert_eq!(
            ScalarValue::try_from(json!([1, 2])).unwrap_err().type_name(),
            "array"
        );
        assert_eq!(
            ScalarValue::try_from(json!({ "key": "value" })).unwrap_err().type_name(),
            "object"
        );
    }

    #[test]
    fn test_display() -> Result<(), Box<dyn Error>> {
        assert_eq!(ScalarValue::from("abc").to_string(), "abc");
        assert_eq!(ScalarValue::from(false).to_string(), "false");
        assert_eq!(ScalarValue::from(3_i32).to_string(), "3");
        assert_eq!(
            ScalarValue::from(NaiveDate::from_ymd_opt(2023, 9, 1).unwrap()).to_string(),
            "2023-09-01"
        );
        assert_eq!(
            ScalarValue::from(DateTime::parse_from_rfc3339("2023-09-01T10:20:30+08:00")?).to_string(),
            "2023-09-01T10:20:30+08:00"
        );
        Ok(())
    }

    #[test]
    fn test_display_duration() {
        assert_eq!(ScalarValue::from(Duration::zero()).to_string(), "PT0S");
        assert_eq!(ScalarValue::from(Duration::seconds(90)).to_string(), "PT1M30S");
        assert_eq!(
            ScalarValue::from(Duration::seconds(86_400 + 3_600 + 60 + 1)).to_string(),
            "P1DT1H1M1S"
        );
        assert_eq!(ScalarValue::from(Duration::seconds(-30)).to_string(), "-PT30S");
    }
}
