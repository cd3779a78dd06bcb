//! Tests for verbosity handling in the tracing setup

#[cfg(test)]
mod tests {
    use jigtile::io::logging::{init, level_directive};

    // Tests each verbosity count maps to the next level
    // Verified by mapping the default to info
    #[test]
    fn test_level_directive() {
        assert_eq!(level_directive(0, false), "warn");
        assert_eq!(level_directive(1, false), "info");
        assert_eq!(level_directive(2, false), "debug");
        assert_eq!(level_directive(3, false), "trace");
        assert_eq!(level_directive(9, false), "trace");
    }

    // Tests quiet overrides verbose flags
    // Verified by checking verbosity before the quiet flag
    #[test]
    fn test_quiet_wins() {
        assert_eq!(level_directive(0, true), "error");
        assert_eq!(level_directive(3, true), "error");
    }

    // Tests repeated initialisation keeps the first subscriber without panicking
    // Verified by calling init instead of try_init
    #[test]
    fn test_init_twice() {
        init(0, true);
        init(2, false);
        tracing::error!("logging initialised");
    }
}
