//! Architecture name normalization.

/// Canonicalize an architecture alias.
///
/// Input is lower-cased first. Known aliases map onto `x86_64`, `x86`,
/// `arm64` or `arm`; anything else comes back lower-cased and otherwise
/// untouched, so this never fails.
pub fn normalize_arch(raw: &str) -> String {
    let arch = raw.to_lowercase();

    let canonical = match arch.as_str() {
        // x86 family
        "x86_64" | "amd64" | "x64" => "x86_64",
        "i386" | "i686" | "x86" | "32" => "x86",

        // ARM family
        "arm64" | "aarch64" | "armv8" | "arm64v8" => "arm64",
        "armv7" => "arm",

        // ppc64, ppc64le, s390x and unknown values pass through
        _ => return arch,
    };

    canonical.to_string()
}
