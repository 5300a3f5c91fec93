// Session-open option bits, forwarded verbatim to aug_init.
use std::fmt;
use std::ops::{BitOr, BitOrAssign};

use crate::core::native::sys;

/// Bitmask of session-open options; combine independent bits with `|`.
#[derive(Clone, Copy, Default, Eq, Hash, PartialEq)]
pub struct Flags(u32);

impl Flags {
    pub const NONE: Flags = Flags(sys::AUG_NONE);
    /// Keep the original file with a backup suffix on save.
    pub const SAVE_BACKUP: Flags = Flags(sys::AUG_SAVE_BACKUP);
    /// Write changes to a `.augnew` file, leaving the original untouched.
    /// Takes precedence over `SAVE_BACKUP`.
    pub const SAVE_NEWFILE: Flags = Flags(sys::AUG_SAVE_NEWFILE);
    /// Enable (expensive) lens type-checking.
    pub const TYPE_CHECK: Flags = Flags(sys::AUG_TYPE_CHECK);
    /// Disable the builtin module search path.
    pub const NO_STDINC: Flags = Flags(sys::AUG_NO_STDINC);
    /// Simulate save without writing files.
    pub const SAVE_NOOP: Flags = Flags(sys::AUG_SAVE_NOOP);
    /// Skip the initial tree load on open.
    pub const NO_LOAD: Flags = Flags(sys::AUG_NO_LOAD);
    /// Skip autoload module scanning on open.
    pub const NO_MODL_AUTOLOAD: Flags = Flags(sys::AUG_NO_MODL_AUTOLOAD);

    pub const fn bits(self) -> u32 {
        self.0
    }

    pub const fn contains(self, other: Flags) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for Flags {
    type Output = Flags;

    fn bitor(self, rhs: Flags) -> Flags {
        Flags(self.0 | rhs.0)
    }
}

impl BitOrAssign for Flags {
    fn bitor_assign(&mut self, rhs: Flags) {
        self.0 |= rhs.0;
    }
}

impl fmt::Debug for Flags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        const NAMES: [(Flags, &str); 7] = [
            (Flags::SAVE_BACKUP, "SAVE_BACKUP"),
            (Flags::SAVE_NEWFILE, "SAVE_NEWFILE"),
            (Flags::TYPE_CHECK, "TYPE_CHECK"),
            (Flags::NO_STDINC, "NO_STDINC"),
            (Flags::SAVE_NOOP, "SAVE_NOOP"),
            (Flags::NO_LOAD, "NO_LOAD"),
            (Flags::NO_MODL_AUTOLOAD, "NO_MODL_AUTOLOAD"),
        ];

        if self.is_empty() {
            return f.write_str("NONE");
        }
        let mut first = true;
        for (flag, name) in NAMES {
            if self.contains(flag) {
                if !first {
                    f.write_str(" | ")?;
                }
                f.write_str(name)?;
                first = false;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::Flags;

    #[test]
    fn bit_values_match_native_abi() {
        let cases = [
            (Flags::NONE, 0),
            (Flags::SAVE_BACKUP, 1 << 0),
            (Flags::SAVE_NEWFILE, 1 << 1),
            (Flags::TYPE_CHECK, 1 << 2),
            (Flags::NO_STDINC, 1 << 3),
            (Flags::SAVE_NOOP, 1 << 4),
            (Flags::NO_LOAD, 1 << 5),
            (Flags::NO_MODL_AUTOLOAD, 1 << 6),
        ];

        for (flag, bits) in cases {
            assert_eq!(flag.bits(), bits);
        }
    }

    #[test]
    fn bits_combine_independently() {
        let flags = Flags::NO_LOAD | Flags::NO_MODL_AUTOLOAD;
        assert!(flags.contains(Flags::NO_LOAD));
        assert!(flags.contains(Flags::NO_MODL_AUTOLOAD));
        assert!(!flags.contains(Flags::SAVE_NOOP));
        assert_eq!(flags.bits(), (1 << 5) | (1 << 6));
    }

    #[test]
    fn default_is_none() {
        assert!(Flags::default().is_empty());
        assert_eq!(Flags::default(), Flags::NONE);
    }

    #[test]
    fn debug_lists_set_bits() {
        let flags = Flags::SAVE_NEWFILE | Flags::SAVE_BACKUP;
        assert_eq!(format!("{flags:?}"), "SAVE_BACKUP | SAVE_NEWFILE");
        assert_eq!(format!("{:?}", Flags::NONE), "NONE");
    }
}
