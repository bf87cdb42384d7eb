#[macro_export]
/// The `record_params!` macro builds a `yandex_pdd_dns::record::RecordParams` from
/// `key => value` pairs.
///
/// This macro supports:
/// - Bare identifiers as keys, used verbatim as the wire field name
/// - String literals as keys, for names that are not valid identifiers
/// - Any value convertible into a `ParamValue` (string slices, strings, integers)
///
/// # Usage
///
/// ```rust,ignore
/// let params = record_params! {
///     subdomain => "www",
///     content => "192.0.2.10",
///     ttl => 3600,
/// };
/// ```
///
/// Where:
/// - `subdomain`, `content`, `ttl` are the query parameter names sent to the service
/// - values are converted through `Into<ParamValue>`
/// - a later pair overrides an earlier pair with the same key
///
macro_rules! record_params {
    // Insert helper: consume one pair at a time until the input is empty
    (@insert $params:ident ;) => {};
    (@insert $params:ident ; $key:ident => $value:expr $(, $($rest:tt)*)?) => {
        $params.insert(stringify!($key), $value);
        $crate::record_params!(@insert $params ; $($($rest)*)?);
    };
    (@insert $params:ident ; $key:literal => $value:expr $(, $($rest:tt)*)?) => {
        $params.insert($key, $value);
        $crate::record_params!(@insert $params ; $($($rest)*)?);
    };

    // Main macro
    () => {
        ::yandex_pdd_dns::record::RecordParams::new()
    };
    ( $($pairs:tt)+ ) => {{
        let mut params = ::yandex_pdd_dns::record::RecordParams::new();
        $crate::record_params!(@insert params ; $($pairs)+);
        params
    }};
}
