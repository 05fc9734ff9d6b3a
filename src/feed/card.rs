//! Post card: one post plus its placeholder photo
//!
//! Each card draws a fresh random seed when it is built, so the same post
//! gets a different photo every time a new card is made for it.

use super::model::Post;
use crate::config::ImageConfig;
use rand::Rng;
use serde::Serialize;

/// Photo service URL template (`{seed}` and `{size}` are substituted)
pub const DEFAULT_IMAGE_TEMPLATE: &str = "https://picsum.photos/seed/{seed}/{size}";

/// Seeds are drawn from `[0, DEFAULT_SEED_BOUND)`
pub const DEFAULT_SEED_BOUND: u32 = 1000;

/// Square photo edge in pixels
pub const DEFAULT_IMAGE_SIZE: u32 = 50;

/// Draw a seed uniformly from `[0, bound)`
///
/// A zero bound is treated as 1 (always seed 0).
pub fn draw_seed<R: Rng + ?Sized>(rng: &mut R, bound: u32) -> u32 {
    rng.gen_range(0..bound.max(1))
}

/// Fill in a photo URL template
pub fn image_url(template: &str, seed: u32, size: u32) -> String {
    template
        .replace("{seed}", &seed.to_string())
        .replace("{size}", &size.to_string())
}

/// Presentation unit for one post
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostCard {
    pub title: String,
    pub body: String,
    pub image_url: String,
    pub seed: u32,
}

impl PostCard {
    /// Build a card, drawing its photo seed from `rng`
    pub fn new<R: Rng + ?Sized>(post: &Post, rng: &mut R, image: &ImageConfig) -> Self {
        let seed = draw_seed(rng, image.seed_bound);
        Self {
            title: post.title.clone(),
            body: post.body.clone(),
            image_url: image_url(&image.url_template, seed, image.size),
            seed,
        }
    }

    /// Build a card seeded from the thread-local generator
    pub fn random(post: &Post, image: &ImageConfig) -> Self {
        Self::new(post, &mut rand::thread_rng(), image)
    }

    /// Plain-text form used for the clipboard
    pub fn to_plain_text(&self) -> String {
        format!("{}\n\n{}\n\n{}", self.title, self.body, self.image_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn seeds_stay_in_range_over_many_draws() {
        let mut rng = StdRng::seed_from_u64(0x5eed);
        for _ in 0..10_000 {
            let seed = draw_seed(&mut rng, DEFAULT_SEED_BOUND);
            assert!(seed < 1000, "seed {} out of range", seed);
        }
    }

    #[test]
    fn thread_rng_seeds_stay_in_range() {
        let mut rng = rand::thread_rng();
        for _ in 0..10_000 {
            assert!(draw_seed(&mut rng, DEFAULT_SEED_BOUND) < DEFAULT_SEED_BOUND);
        }
    }

    #[test]
    fn zero_bound_always_draws_zero() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(draw_seed(&mut rng, 0), 0);
    }

    #[test]
    fn formats_default_photo_url() {
        assert_eq!(
            image_url(DEFAULT_IMAGE_TEMPLATE, 417, DEFAULT_IMAGE_SIZE),
            "https://picsum.photos/seed/417/50"
        );
    }

    #[test]
    fn card_carries_post_text_and_seeded_url() {
        let post = Post::new("Hello", "World");
        let mut rng = StdRng::seed_from_u64(42);
        let card = PostCard::new(&post, &mut rng, &ImageConfig::default());

        assert_eq!(card.title, "Hello");
        assert_eq!(card.body, "World");
        assert!(card.seed < DEFAULT_SEED_BOUND);
        assert_eq!(
            card.image_url,
            format!("https://picsum.photos/seed/{}/50", card.seed)
        );
    }

    #[test]
    fn new_cards_for_same_post_redraw_the_seed() {
        let post = Post::new("Same", "post");
        let mut rng = StdRng::seed_from_u64(7);
        let image = ImageConfig::default();

        let seeds: std::collections::HashSet<u32> = (0..50)
            .map(|_| PostCard::new(&post, &mut rng, &image).seed)
            .collect();
        assert!(seeds.len() > 1);
    }

    #[test]
    fn plain_text_includes_all_parts() {
        let card = PostCard {
            title: "T".to_string(),
            body: "B".to_string(),
            image_url: "U".to_string(),
            seed: 0,
        };
        assert_eq!(card.to_plain_text(), "T\n\nB\n\nU");
    }
}
