use std::time::Duration;

/// 请求幂等性
///
/// 影响传输层是否可以安全地重试该请求
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum Idempotent {
    /// 总是幂等
    Always,

    /// 根据 HTTP 方法判定幂等性
    ///
    /// 参考 <https://datatracker.ietf.org/doc/html/rfc7231#section-4.2.2>
    #[default]
    Default,

    /// 总不幂等
    Never,
}

/// 请求选项
///
/// 由传输层消费的单次请求配置，每种选项按种类唯一，后添加的生效
#[derive(Clone, Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum RequestOption {
    /// 请求幂等性
    Idempotent(Idempotent),

    /// 请求超时时长
    Timeout(Duration),

    /// 最大重试次数
    RetryLimit(usize),

    /// 是否跟随重定向
    FollowRedirection(bool),
}

impl RequestOption {
    /// 获取请求选项的种类
    #[inline]
    pub fn kind(&self) -> RequestOptionKind {
        match self {
            Self::Idempotent(_) => RequestOptionKind::Idempotent,
            Self::Timeout(_) => RequestOptionKind::Timeout,
            Self::RetryLimit(_) => RequestOptionKind::RetryLimit,
            Self::FollowRedirection(_) => RequestOptionKind::FollowRedirection,
        }
    }
}

/// 请求选项的种类
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
#[non_exhaustive]
pub enum RequestOptionKind {
    /// 请求幂等性
    Idempotent,

    /// 请求超时时长
    Timeout,

    /// 最大重试次数
    RetryLimit,

    /// 是否跟随重定向
    FollowRedirection,
}
