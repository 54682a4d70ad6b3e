/// Image catalog generation and shuffling
use rand::Rng;
use std::path::{Path, PathBuf};

use super::data::ImageDescriptor;
use crate::config::GalleryConfig;

/// Build the full catalog, one descriptor per index in 1..=total_images
pub fn generate(config: &GalleryConfig) -> Vec<ImageDescriptor> {
    (1..=config.total_images)
        .map(|i| ImageDescriptor {
            id: i,
            source: source_locator(&config.image_dir, &config.basename, i),
            alt: format!("{} image {}", config.subject, i),
            title: format!("{} Image #{}", config.subject, i),
            description: format!("Explicit designs of {} {}", config.subject, i),
        })
        .collect()
}

/// File naming convention: `<dir>/<basename> (<index>).jpg`
pub fn source_locator(dir: &Path, basename: &str, index: usize) -> PathBuf {
    dir.join(format!("{} ({}).jpg", basename, index))
}

/// Fisher-Yates shuffle: walks from the last index down to 1,
/// swapping each slot with a uniformly drawn slot in 0..=i
pub fn shuffle_in_place<T, R: Rng>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.random_range(0..=i);
        items.swap(i, j);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashMap;

    #[test]
    fn test_generate() {
        let config = GalleryConfig::default();
        let catalog = generate(&config);

        assert_eq!(catalog.len(), 147);
        for (pos, descriptor) in catalog.iter().enumerate() {
            assert_eq!(descriptor.id, pos + 1);
        }

        let fifth = &catalog[4];
        assert_eq!(fifth.source, PathBuf::from("images/zeus (5).jpg"));
        assert_eq!(fifth.alt, "Zuez image 5");
        assert_eq!(fifth.title, "Zuez Image #5");
        assert_eq!(fifth.description, "Explicit designs of Zuez 5");
    }

    #[test]
    fn test_generate_empty() {
        let config = GalleryConfig {
            total_images: 0,
            ..GalleryConfig::default()
        };
        assert!(generate(&config).is_empty());
    }

    #[test]
    fn test_shuffle_is_permutation() {
        let catalog = generate(&GalleryConfig::default());
        let mut shuffled = catalog.clone();
        let mut rng = StdRng::seed_from_u64(7);

        shuffle_in_place(&mut shuffled, &mut rng);

        let mut before: Vec<usize> = catalog.iter().map(|d| d.id).collect();
        let mut after: Vec<usize> = shuffled.iter().map(|d| d.id).collect();
        assert_ne!(before, after);
        before.sort_unstable();
        after.sort_unstable();
        assert_eq!(before, after);
    }

    #[test]
    fn test_shuffle_short_slices() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut empty: Vec<u8> = vec![];
        shuffle_in_place(&mut empty, &mut rng);
        assert!(empty.is_empty());

        let mut one = vec![42];
        shuffle_in_place(&mut one, &mut rng);
        assert_eq!(one, vec![42]);
    }

    #[test]
    fn test_shuffle_is_roughly_uniform() {
        // 3 elements have 6 permutations; each should show up ~1/6 of the time
        let trials = 60_000;
        let mut rng = StdRng::seed_from_u64(2024);
        let mut counts: HashMap<[u8; 3], usize> = HashMap::new();

        for _ in 0..trials {
            let mut items = [0u8, 1, 2];
            shuffle_in_place(&mut items, &mut rng);
            *counts.entry(items).or_default() += 1;
        }

        assert_eq!(counts.len(), 6);
        let expected = trials as f64 / 6.0;
        let chi_square: f64 = counts
            .values()
            .map(|&observed| {
                let diff = observed as f64 - expected;
                diff * diff / expected
            })
            .sum();
        // 5 degrees of freedom, p = 0.001 critical value is ~20.5
        assert!(chi_square < 20.5, "chi-square too large: {chi_square}");
    }
}
