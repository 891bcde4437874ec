//! Traits describing read-only world data.
//!
//! Oracles expose the segment catalog, the bestiary, the dictionary and the
//! deterministic random source. The [`Env`] aggregate bundles them so the
//! action pipeline can reach everything it needs without hard coupling to
//! concrete implementations; `wyrm-content` provides the catalog and
//! bestiary, the embedding application provides the dictionary.

mod bestiary;
mod catalog;
mod error;
mod rng;
mod word;

pub use bestiary::{BeastDefinition, BestiaryOracle};
pub use catalog::{CatalogOracle, SegmentDefinition};
pub use error::OracleError;
pub use rng::{PcgRng, RngOracle, compute_seed};
pub use word::WordOracle;

/// Aggregates read-only oracles required by the action pipeline.
#[derive(Clone, Copy, Debug)]
pub struct Env<'a, C, B, W, R>
where
    C: CatalogOracle + ?Sized,
    B: BestiaryOracle + ?Sized,
    W: WordOracle + ?Sized,
    R: RngOracle + ?Sized,
{
    catalog: Option<&'a C>,
    bestiary: Option<&'a B>,
    words: Option<&'a W>,
    rng: Option<&'a R>,
}

pub type GameEnv<'a> = Env<
    'a,
    dyn CatalogOracle + 'a,
    dyn BestiaryOracle + 'a,
    dyn WordOracle + 'a,
    dyn RngOracle + 'a,
>;

impl<'a, C, B, W, R> Env<'a, C, B, W, R>
where
    C: CatalogOracle + ?Sized,
    B: BestiaryOracle + ?Sized,
    W: WordOracle + ?Sized,
    R: RngOracle + ?Sized,
{
    pub fn new(
        catalog: Option<&'a C>,
        bestiary: Option<&'a B>,
        words: Option<&'a W>,
        rng: Option<&'a R>,
    ) -> Self {
        Self {
            catalog,
            bestiary,
            words,
            rng,
        }
    }

    pub fn with_all(catalog: &'a C, bestiary: &'a B, words: &'a W, rng: &'a R) -> Self {
        Self::new(Some(catalog), Some(bestiary), Some(words), Some(rng))
    }

    pub fn empty() -> Self {
        Self {
            catalog: None,
            bestiary: None,
            words: None,
            rng: None,
        }
    }

    pub fn catalog(&self) -> Result<&'a C, OracleError> {
        self.catalog.ok_or(OracleError::CatalogNotAvailable)
    }

    pub fn bestiary(&self) -> Result<&'a B, OracleError> {
        self.bestiary.ok_or(OracleError::BestiaryNotAvailable)
    }

    pub fn words(&self) -> Result<&'a W, OracleError> {
        self.words.ok_or(OracleError::WordNotAvailable)
    }

    pub fn rng(&self) -> Result<&'a R, OracleError> {
        self.rng.ok_or(OracleError::RngNotAvailable)
    }
}

impl<'a, C, B, W, R> Env<'a, C, B, W, R>
where
    C: CatalogOracle + 'a,
    B: BestiaryOracle + 'a,
    W: WordOracle + 'a,
    R: RngOracle + 'a,
{
    /// Converts to the trait-object form the action pipeline consumes.
    pub fn as_game_env(&self) -> GameEnv<'a> {
        let catalog: Option<&'a dyn CatalogOracle> = self.catalog.map(|c| c as _);
        let bestiary: Option<&'a dyn BestiaryOracle> = self.bestiary.map(|b| b as _);
        let words: Option<&'a dyn WordOracle> = self.words.map(|w| w as _);
        let rng: Option<&'a dyn RngOracle> = self.rng.map(|r| r as _);
        Env::new(catalog, bestiary, words, rng)
    }
}
