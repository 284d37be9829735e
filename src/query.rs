use super::scalar::ScalarValue;
use auto_impl::auto_impl;
use std::borrow::Cow;

/// 查询参数名称
pub type QueryPairKey = Cow<'static, str>;

/// 路径参数或查询参数的取值
///
/// 既可以是单个取值，也可以是有序的取值列表
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ParamValue {
    /// 单个取值
    Single(String),
    /// 有序的取值列表
    List(Vec<String>),
}

macro_rules! impl_single_from_for_param_value {
    ($($source:ty),*) => {
        $(
            impl From<$source> for ParamValue {
                #[inline]
                fn from(value: $source) -> Self {
                    Self::Single(value.to_string())
                }
            }
        )*
    };
}

impl_single_from_for_param_value!(bool, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

impl From<String> for ParamValue {
    #[inline]
    fn from(value: String) -> Self {
        Self::Single(value)
    }
}

impl From<&str> for ParamValue {
    #[inline]
    fn from(value: &str) -> Self {
        Self::Single(value.to_owned())
    }
}

impl From<Cow<'_, str>> for ParamValue {
    #[inline]
    fn from(value: Cow<'_, str>) -> Self {
        Self::Single(value.into_owned())
    }
}

impl From<ScalarValue> for ParamValue {
    #[inline]
    fn from(value: ScalarValue) -> Self {
        Self::Single(value.to_string())
    }
}

impl<T: ToString + std::fmt::Display> From<Vec<T>> for ParamValue {
    #[inline]
    fn from(values: Vec<T>) -> Self {
        values.iter().collect()
    }
}

impl<T: ToString + std::fmt::Display> From<&[T]> for ParamValue {
    #[inline]
    fn from(values: &[T]) -> Self {
        values.iter().collect()
    }
}

impl<T: ToString> FromIterator<T> for ParamValue {
    #[inline]
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::List(iter.into_iter().map(|value| value.to_string()).collect())
    }
}

/// 查询参数来源
///
/// 由生成的客户端代码实现，
/// 以静态绑定表的形式声明查询参数名称到取值的映射，
/// 名称一栏已经体现了字段的改写名称（如果有的话）
#[auto_impl(&, &mut, Box, Rc, Arc)]
pub trait QueryParameterSource {
    /// 返回查询参数名称到取值的绑定表
    ///
    /// 取值为 [`None`] 的条目会被跳过
    fn query_parameter_pairs(&self) -> Vec<(QueryPairKey, Option<ParamValue>)>;
}
