use carteira_types::QueryValue;

/// Serialize flat parameters as `k=v&k2=v2` in insertion order, form-url-encoded.
#[must_use]
pub fn serialize_query(params: &[(String, QueryValue)]) -> String {
    let mut ser = url::form_urlencoded::Serializer::new(String::new());
    for (name, value) in params {
        ser.append_pair(name, &value.to_string());
    }
    ser.finish()
}

/// Append `?<query>` to `url` when `params` is non-empty.
#[must_use]
pub fn append_query(url: &str, params: &[(String, QueryValue)]) -> String {
    if params.is_empty() {
        return url.to_string();
    }
    format!("{url}?{}", serialize_query(params))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(name: &str, v: impl Into<QueryValue>) -> (String, QueryValue) {
        (name.to_string(), v.into())
    }

    #[test]
    fn keeps_insertion_order_and_stringifies() {
        let params = vec![p("tipo", "fiis"), p("page", 2)];
        assert_eq!(
            append_query("http://h/api/ranking/", &params),
            "http://h/api/ranking/?tipo=fiis&page=2"
        );
    }

    #[test]
    fn empty_params_leave_url_untouched() {
        assert_eq!(append_query("http://h/x/", &[]), "http://h/x/");
    }

    #[test]
    fn reserved_characters_are_encoded() {
        let params = vec![p("q", "a&b c")];
        assert_eq!(serialize_query(&params), "q=a%26b+c");
    }
}
