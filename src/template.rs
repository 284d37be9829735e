use super::{error::ResolveError, query::ParamValue};
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS, NON_ALPHANUMERIC};
use std::collections::HashMap;

// RFC 6570 的 unreserved 字符集，其余字符全部百分号编码
const SIMPLE_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

// 保留展开允许 reserved 字符和已有的百分号编码序列原样通过
const RESERVED_ENCODE_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'<')
    .add(b'>')
    .add(b'\\')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'}')
    .add(b'|');

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Operator {
    Simple,
    Reserved,
    Query,
    Continuation,
}

impl Operator {
    fn parse(expression: &str) -> Result<(Self, &str), ResolveError> {
        match expression.chars().next() {
            Some('+') => Ok((Self::Reserved, &expression[1..])),
            Some('?') => Ok((Self::Query, &expression[1..])),
            Some('&') => Ok((Self::Continuation, &expression[1..])),
            Some(c) if "#./;=,!@|".contains(c) => Err(ResolveError::UnsupportedOperator(c)),
            _ => Ok((Self::Simple, expression)),
        }
    }

    fn encode<'a>(self, value: &'a str) -> impl Iterator<Item = &'a str> {
        let encode_set = match self {
            Self::Reserved => RESERVED_ENCODE_SET,
            _ => SIMPLE_ENCODE_SET,
        };
        utf8_percent_encode(value, encode_set)
    }
}

/// 展开 URL 模板
///
/// 支持 RFC 6570 的简单展开、保留展开和表单风格的查询展开，
/// 未定义的变量展开为空
pub(crate) fn expand(template: &str, vars: &HashMap<&str, &ParamValue>) -> Result<String, ResolveError> {
    let mut expanded = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find('{') {
        expanded.push_str(&rest[..start]);
        rest = &rest[(start + 1)..];
        let end = rest.find('}').ok_or(ResolveError::UnterminatedExpression)?;
        expand_expression(&mut expanded, &rest[..end], vars)?;
        rest = &rest[(end + 1)..];
    }
    expanded.push_str(rest);
    Ok(expanded)
}

fn expand_expression(
    expanded: &mut String,
    expression: &str,
    vars: &HashMap<&str, &ParamValue>,
) -> Result<(), ResolveError> {
    let (operator, varspecs) = Operator::parse(expression)?;
    match operator {
        Operator::Simple | Operator::Reserved => {
            let mut first = true;
            for varspec in varspecs.split(',') {
                let (name, _) = parse_varspec(varspec);
                let Some(value) = vars.get(name) else {
                    continue;
                };
                if !first {
                    expanded.push(',');
                }
                first = false;
                match value {
                    ParamValue::Single(value) => expanded.extend(operator.encode(value)),
                    ParamValue::List(values) => {
                        for (index, value) in values.iter().enumerate() {
                            if index > 0 {
                                expanded.push(',');
                            }
                            expanded.extend(operator.encode(value));
                        }
                    }
                }
            }
        }
        Operator::Query | Operator::Continuation => {
            let mut first = true;
            for varspec in varspecs.split(',') {
                let (name, explode) = parse_varspec(varspec);
                let Some(value) = vars.get(name) else {
                    continue;
                };
                match value {
                    ParamValue::Single(value) => {
                        push_pair_name(expanded, &mut first, operator, name);
                        expanded.extend(operator.encode(value));
                    }
                    ParamValue::List(values) if explode => {
                        for value in values {
                            push_pair_name(expanded, &mut first, operator, name);
                            expanded.extend(operator.encode(value));
                        }
                    }
                    ParamValue::List(values) => {
                        push_pair_name(expanded, &mut first, operator, name);
                        for (index, value) in values.iter().enumerate() {
                            if index > 0 {
                                expanded.push(',');
                            }
                            expanded.extend(operator.encode(value));
                        }
                    }
                }
            }
        }
    }
    Ok(())
}

fn parse_varspec(varspec: &str) -> (&str, bool) {
    match varspec.strip_suffix('*') {
        Some(name) => (name, true),
        None => (varspec, false),
    }
}

fn push_pair_name(expanded: &mut String, first: &mut bool, operator: Operator, name: &str) {
    if *first {
        expanded.push(if operator == Operator::Query { '?' } else { '&' });
        *first = false;
    } else {
        expanded.push('&');
    }
    expanded.push_str(name);
    expanded.push('=');
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_vars(pairs: &[(&'static str, ParamValue)]) -> HashMap<&'static str, ParamValue> {
        pairs.iter().cloned().collect()
    }

    fn expand_with(template: &str, pairs: &[(&'static str, ParamValue)]) -> Result<String, ResolveError> {
        let owned = make_vars(pairs);
        let vars = owned.iter().map(|(key, value)| (*key, value)).collect();
        expand(template, &vars)
    }

    #[test]
    fn test_simple_expansion() -> Result<(), ResolveError> {
        assert_eq!(
            expand_with("/users/{id}", &[("id", ParamValue::from("42"))])?,
            "/users/42"
        );
        assert_eq!(
            expand_with("/files/{dir,name}", &[
                ("dir", ParamValue::from("docs")),
                ("name", ParamValue::from("a b")),
            ])?,
            "/files/docs,a%20b"
        );
        assert_eq!(expand_with("/users/{id}", &[])?, "/users/");
        Ok(())
    }

    #[test]
    fn test_reserved_expansion() -> Result<(), ResolveError> {
        assert_eq!(
            expand_with("{+baseurl}/users", &[("baseurl", ParamValue::from("https://example.com/v1"))])?,
            "https://example.com/v1/users"
        );
        // 简单展开会编码保留字符
        assert_eq!(
            expand_with("{baseurl}", &[("baseurl", ParamValue::from("https://example.com"))])?,
            "https%3A%2F%2Fexample.com"
        );
        Ok(())
    }

    #[test]
    fn test_query_expansion() -> Result<(), ResolveError> {
        assert_eq!(
            expand_with("/users{?filter,top}", &[
                ("filter", ParamValue::from("active")),
                ("top", ParamValue::from(5)),
            ])?,
            "/users?filter=active&top=5"
        );
        assert_eq!(
            expand_with("/users{?filter,top}", &[("top", ParamValue::from(5))])?,
            "/users?top=5"
        );
        assert_eq!(expand_with("/users{?filter,top}", &[])?, "/users");
        assert_eq!(
            expand_with("/users{?filter}{&top}", &[
                ("filter", ParamValue::from("active")),
                ("top", ParamValue::from(5)),
            ])?,
            "/users?filter=active&top=5"
        );
        Ok(())
    }

    #[test]
    fn test_query_expansion_with_lists() -> Result<(), ResolveError> {
        assert_eq!(
            expand_with("/users{?select}", &[("select", ParamValue::from(vec!["id", "name"]))])?,
            "/users?select=id,name"
        );
        assert_eq!(
            expand_with("/users{?select*}", &[("select", ParamValue::from(vec!["id", "name"]))])?,
            "/users?select=id&select=name"
        );
        Ok(())
    }

    #[test]
    fn test_invalid_templates() {
        assert!(matches!(
            expand_with("/users/{id", &[]),
            Err(ResolveError::UnterminatedExpression)
        ));
        assert!(matches!(
            expand_with("/users{#fragment}", &[]),
            Err(ResolveError::UnsupportedOperator('#'))
        ));
    }
}
