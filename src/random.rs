use chrono::Utc;
use rand::distributions::Alphanumeric;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Random `[a-zA-Z0-9]` string of exactly `length` chars.
///
/// The generator is reseeded from the wall clock on every call, so the
/// output is not suitable for anything that must be unguessable.
pub fn generate_random_string(length: usize) -> String {
    let seed = Utc::now().timestamp_nanos_opt().unwrap_or_default() as u64;
    let mut rng = StdRng::seed_from_u64(seed);
    generate_random_string_with(&mut rng, length)
}

pub fn generate_random_string_with<R: Rng>(rng: &mut R, length: usize) -> String {
    (0..length)
        .map(|_| char::from(rng.sample(Alphanumeric)))
        .collect()
}

/// `<yyyymmddHHMMSS>_<16 random chars>[.ext]`, for upload destinations.
pub fn unique_file_name(ext: &str) -> String {
    let prefix = Utc::now().format("%Y%m%d%H%M%S").to_string();
    let name = format!("{}_{}", prefix, generate_random_string(16));
    let ext = ext.trim_start_matches('.');
    if ext.is_empty() {
        name
    } else {
        format!("{}.{}", name, ext)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_alphanumeric(s: &str) -> bool {
        s.chars().all(|c| c.is_ascii_alphanumeric())
    }

    #[test]
    fn length_and_alphabet() {
        for n in [0usize, 1, 7, 32, 256] {
            let s = generate_random_string(n);
            assert_eq!(s.len(), n);
            assert!(is_alphanumeric(&s), "unexpected char in {s}");
        }
    }

    #[test]
    fn seeded_rng_is_deterministic() {
        let a = generate_random_string_with(&mut StdRng::seed_from_u64(42), 24);
        let b = generate_random_string_with(&mut StdRng::seed_from_u64(42), 24);
        let c = generate_random_string_with(&mut StdRng::seed_from_u64(43), 24);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn large_sample_covers_every_class() {
        let s = generate_random_string_with(&mut StdRng::seed_from_u64(7), 4096);
        assert!(s.chars().any(|c| c.is_ascii_lowercase()));
        assert!(s.chars().any(|c| c.is_ascii_uppercase()));
        assert!(s.chars().any(|c| c.is_ascii_digit()));
    }

    #[test]
    fn unique_file_name_shape() {
        let name = unique_file_name(".png");
        let (stem, ext) = name.rsplit_once('.').unwrap();
        assert_eq!(ext, "png");
        let (stamp, random) = stem.split_once('_').unwrap();
        assert_eq!(stamp.len(), 14);
        assert!(stamp.chars().all(|c| c.is_ascii_digit()));
        assert_eq!(random.len(), 16);
        assert!(is_alphanumeric(random));

        assert!(!unique_file_name("").contains('.'));
    }
}
