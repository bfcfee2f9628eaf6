pub mod posters;
pub mod recommender;

pub use posters::{PosterProvider, TmdbPosterClient};
