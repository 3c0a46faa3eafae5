use std::{collections::HashMap, error::Error, path::Path};

use serde::{Deserialize, Serialize};

use crate::DataError;

static EMISSION_FACTORS: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/src/emission_factors.csv"
));

/// Number of trees needed to absorb one metric ton of CO2 in one year.
/// One tree absorbs roughly 16.67 kg of CO2 per year, so 1000 / 16.67 ≈ 6.
pub static TREES_PER_TON: f64 = 6.0;

/// The in-memory representation of the emissions of a transport mode
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct EmissionFactor {
    /// the identifier (e.g. `carro_gasolina`)
    pub mode: String,
    /// the human-readable name (e.g. `Carro a Gasolina`)
    pub name: String,
    /// the emissions in kg of CO2 per km travelled
    pub kg_co2_per_km: f64,
}

/// The emission factor of every known transport mode and the ratio used to
/// offset emissions with trees. Immutable once built.
#[derive(Debug, Clone)]
pub struct EmissionModel {
    factors: Vec<EmissionFactor>,
    index: HashMap<String, usize>,
    trees_per_ton: f64,
}

impl EmissionModel {
    /// # Error
    /// Errors if a mode is repeated, a factor is not positive or the offset ratio is not positive
    pub fn new(factors: Vec<EmissionFactor>, trees_per_ton: f64) -> Result<Self, DataError> {
        if !(trees_per_ton.is_finite() && trees_per_ton > 0.0) {
            return Err(DataError::InvalidOffsetRatio(trees_per_ton));
        }
        let mut index = HashMap::with_capacity(factors.len());
        for (i, factor) in factors.iter().enumerate() {
            if !(factor.kg_co2_per_km.is_finite() && factor.kg_co2_per_km > 0.0) {
                return Err(DataError::InvalidFactor {
                    mode: factor.mode.clone(),
                    factor: factor.kg_co2_per_km,
                });
            }
            if index.insert(factor.mode.clone(), i).is_some() {
                return Err(DataError::DuplicateMode(factor.mode.clone()));
            }
        }
        Ok(Self {
            factors,
            index,
            trees_per_ton,
        })
    }

    /// Returns the model shipped with this crate, offset at [`TREES_PER_TON`]
    pub fn embedded() -> Result<Self, Box<dyn Error>> {
        Self::from_csv(EMISSION_FACTORS.as_bytes(), TREES_PER_TON)
    }

    /// Builds a model from CSV-encoded factors (`mode,name,kg_co2_per_km`)
    pub fn from_csv(data: &[u8], trees_per_ton: f64) -> Result<Self, Box<dyn Error>> {
        let factors = crate::csv::deserialize::<EmissionFactor>(data)?;
        Ok(Self::new(factors, trees_per_ton)?)
    }

    pub fn load(path: impl AsRef<Path>, trees_per_ton: f64) -> Result<Self, Box<dyn Error>> {
        let model = Self::new(crate::csv::load(path)?, trees_per_ton)?;
        log::info!("Loaded {} transport modes", model.factors.len());
        Ok(model)
    }

    /// Returns this model with a different offset ratio
    pub fn with_trees_per_ton(self, trees_per_ton: f64) -> Result<Self, DataError> {
        Self::new(self.factors, trees_per_ton)
    }

    pub fn contains(&self, mode: &str) -> bool {
        self.index.contains_key(mode)
    }

    fn get(&self, mode: &str) -> Option<&EmissionFactor> {
        self.index.get(mode).map(|i| &self.factors[*i])
    }

    /// Returns the emission factor of `mode` in kg CO2/km, or `None` if the mode is unknown
    pub fn factor_for(&self, mode: &str) -> Option<f64> {
        self.get(mode).map(|f| f.kg_co2_per_km)
    }

    /// Returns the human-readable name of `mode`, or `mode` itself if it is unknown
    pub fn display_name<'a>(&'a self, mode: &'a str) -> &'a str {
        self.get(mode).map(|f| f.name.as_str()).unwrap_or(mode)
    }

    /// All transport modes, in display order
    pub fn modes(&self) -> &[EmissionFactor] {
        &self.factors
    }

    pub fn trees_per_ton(&self) -> f64 {
        self.trees_per_ton
    }
}
