// Fri Feb 06 2026 - Alex

use bitflags::bitflags;

bitflags! {
    /// Access flags as stored in a method descriptor (`kAcc*`).
    ///
    /// The low bits coincide with the reflective modifier bits, so the same
    /// type describes both. Bits not named here are kept as-is.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct AccessFlags: u32 {
        const PUBLIC = 0x0001;
        const PRIVATE = 0x0002;
        const PROTECTED = 0x0004;
        const STATIC = 0x0008;
        const FINAL = 0x0010;
        const SYNCHRONIZED = 0x0020;
        const NATIVE = 0x0100;
        const ABSTRACT = 0x0400;
        const CONSTRUCTOR = 0x0001_0000;
        const FAST_NATIVE = 0x0008_0000;
    }
}

impl AccessFlags {
    /// Flags of `android.os.Process.setArgV0`: public static final native.
    pub const REFERENCE_NATIVE: AccessFlags = AccessFlags::from_bits_retain(0x0119);

    pub fn from_raw(raw: u64) -> Self {
        Self::from_bits_retain(raw as u32)
    }

    /// Clears PUBLIC and sets PRIVATE, leaving every other bit alone.
    pub fn privatized(self) -> Self {
        (self - AccessFlags::PUBLIC) | AccessFlags::PRIVATE
    }

    /// Source-order modifier keywords, as `Modifier.toString` prints them.
    pub fn java_modifiers(self) -> String {
        const ORDER: [(AccessFlags, &str); 8] = [
            (AccessFlags::PUBLIC, "public"),
            (AccessFlags::PROTECTED, "protected"),
            (AccessFlags::PRIVATE, "private"),
            (AccessFlags::ABSTRACT, "abstract"),
            (AccessFlags::STATIC, "static"),
            (AccessFlags::FINAL, "final"),
            (AccessFlags::SYNCHRONIZED, "synchronized"),
            (AccessFlags::NATIVE, "native"),
        ];
        ORDER
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, word)| *word)
            .collect::<Vec<_>>()
            .join(" ")
    }
}
