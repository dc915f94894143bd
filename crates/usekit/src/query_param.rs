//! Two-way binding between state and a query-string parameter.

use tracing::debug;
use url::Url;
use usekit_core::{host, use_signal};

fn query_value(url: &Url, key: &str) -> Option<String> {
    url.query_pairs()
        .find(|(name, _)| name == key)
        .map(|(_, value)| value.into_owned())
}

/// `url` with `key` set to `value`, or removed when `value` is blank.
///
/// Other parameters keep their order; a query left empty is dropped.
fn with_query_value(url: &Url, key: &str, value: &str) -> Url {
    let mut pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(name, value)| (name.into_owned(), value.into_owned()))
        .collect();

    if value.trim().is_empty() {
        pairs.retain(|(name, _)| name != key);
    } else if let Some(slot) = pairs.iter_mut().find(|(name, _)| name == key) {
        slot.1 = value.to_owned();
        pairs.retain({
            let mut seen = false;
            move |(name, _)| name != key || !std::mem::replace(&mut seen, true)
        });
    } else {
        pairs.push((key.to_owned(), value.to_owned()));
    }

    let mut rewritten = url.clone();
    if pairs.is_empty() {
        rewritten.set_query(None);
    } else {
        rewritten.query_pairs_mut().clear().extend_pairs(pairs);
    }
    rewritten
}

/// State mirrored into the `key` query parameter.
///
/// The initial value comes from the current location, falling back to
/// `default`. The setter stores the new value and rewrites the location
/// with [`host::replace_state`]; a blank value removes the parameter. On a
/// host without a location only the state changes.
pub fn use_query_param(key: &str, default: &str) -> (String, impl Fn(&str) + Clone + use<>) {
    let state = use_signal(|| {
        host::location()
            .and_then(|url| query_value(&url, key))
            .unwrap_or_else(|| default.to_owned())
    });

    let key = key.to_owned();
    let value = state.get();
    let setter = move |value: &str| {
        if let Some(url) = host::location() {
            let rewritten = with_query_value(&url, &key, value);
            debug!(key = %key, %rewritten, "syncing query parameter");
            host::replace_state(rewritten);
        }
        state.set(value.to_owned());
    };
    (value, setter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use usekit_core::host::HostConfig;
    use usekit_core::{clear_hooks, render};

    fn at(url: &str) {
        host::configure(HostConfig {
            location: Some(Url::parse(url).unwrap()),
            ..HostConfig::default()
        });
        clear_hooks();
    }

    fn current() -> String {
        host::location().unwrap().to_string()
    }

    #[test]
    fn reads_initial_value_from_location() {
        at("https://shop.test/search?q=boots&page=3");
        let (page, _) = render(|| use_query_param("page", "1"));
        assert_eq!(page, "3");
    }

    #[test]
    fn falls_back_to_default() {
        at("https://shop.test/search?q=boots");
        let (page, _) = render(|| use_query_param("page", "1"));
        assert_eq!(page, "1");
    }

    #[test]
    fn setter_updates_state_and_location() {
        at("https://shop.test/search?q=boots");
        let (_, set_page) = render(|| use_query_param("page", "1"));

        set_page("4");
        assert_eq!(render(|| use_query_param("page", "1")).0, "4");
        assert_eq!(current(), "https://shop.test/search?q=boots&page=4");

        set_page("5");
        assert_eq!(current(), "https://shop.test/search?q=boots&page=5");
    }

    #[test]
    fn blank_value_removes_the_parameter() {
        at("https://shop.test/search?q=boots&page=2");
        let (_, set_query) = render(|| use_query_param("q", ""));

        set_query("  ");
        assert_eq!(current(), "https://shop.test/search?page=2");
        assert_eq!(render(|| use_query_param("q", "")).0, "  ");
    }

    #[test]
    fn empty_query_is_dropped() {
        let url = Url::parse("https://shop.test/search?page=2#results").unwrap();
        assert_eq!(
            with_query_value(&url, "page", "").as_str(),
            "https://shop.test/search#results"
        );
    }

    #[test]
    fn duplicate_keys_collapse_to_one() {
        let url = Url::parse("https://shop.test/?tag=a&tag=b&q=x").unwrap();
        assert_eq!(
            with_query_value(&url, "tag", "c").as_str(),
            "https://shop.test/?tag=c&q=x"
        );
    }

    #[test]
    fn values_are_percent_encoded() {
        at("https://shop.test/search");
        let (_, set_query) = render(|| use_query_param("q", ""));

        set_query("red shoes & socks");
        assert_eq!(
            host::location().unwrap().query(),
            Some("q=red+shoes+%26+socks")
        );
        assert_eq!(
            render(|| use_query_param("q", "")).0,
            "red shoes & socks"
        );
    }

    #[test]
    fn without_location_only_state_changes() {
        host::reset();
        clear_hooks();

        let (_, set_page) = render(|| use_query_param("page", "1"));
        set_page("2");
        assert_eq!(render(|| use_query_param("page", "1")).0, "2");
        assert!(host::location().is_none());
    }
}
