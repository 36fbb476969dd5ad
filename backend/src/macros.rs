//! Shared macros for the backend crate.

/// Implement `fmt::Debug` for a struct while masking credential-bearing
/// fields.
///
/// Each field is listed with `show` (printed as-is) or `redact` (printed as
/// `"[REDACTED]"`). Unlisted fields are omitted and the output ends with `..`.
///
/// ```ignore
/// redacted_debug!(Config {
///     redact database_url,
///     show bind_address,
/// });
/// ```
macro_rules! redacted_debug {
    ($name:ident { $( $kind:ident $field:ident ),* $(,)? }) => {
        impl ::std::fmt::Debug for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                let mut s = f.debug_struct(stringify!($name));
                $( redacted_debug!(@field s, self, $kind, $field); )*
                s.finish_non_exhaustive()
            }
        }
    };
    (@field $s:ident, $self:ident, show, $field:ident) => {
        $s.field(stringify!($field), &$self.$field);
    };
    (@field $s:ident, $self:ident, redact, $field:ident) => {
        $s.field(stringify!($field), &"[REDACTED]");
    };
}

#[cfg(test)]
mod tests {
    #[allow(dead_code)]
    struct StoreSettings {
        uri: String,
        database: String,
        pool_size: u32,
    }

    redacted_debug!(StoreSettings {
        redact uri,
        show database,
    });

    #[test]
    fn test_redacted_field_is_masked() {
        let settings = StoreSettings {
            uri: "mongodb://admin:pw@db:27017".to_string(),
            database: "broker".to_string(),
            pool_size: 4,
        };
        let output = format!("{:?}", settings);
        assert!(!output.contains("admin:pw"));
        assert!(output.contains("uri: \"[REDACTED]\""));
        assert!(output.contains("database: \"broker\""));
    }

    #[test]
    fn test_unlisted_fields_are_omitted() {
        let settings = StoreSettings {
            uri: String::new(),
            database: String::new(),
            pool_size: 4,
        };
        let output = format!("{:?}", settings);
        assert!(!output.contains("pool_size"));
        assert!(output.ends_with(".. }"));
    }
}
