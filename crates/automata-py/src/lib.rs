use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use reward_automata_core::config::AutomataConfig;
use reward_automata_core::generator::FieldGenerator;
use reward_automata_core::rng::create_rng;

/// Minimal PyO3 module exposing the reward field generator to the Python game.
#[pyfunction]
fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[pyfunction]
fn default_config_json() -> PyResult<String> {
    serde_json::to_string(&AutomataConfig::default())
        .map_err(|e| PyValueError::new_err(format!("failed to serialize default config: {e}")))
}

#[pyfunction]
fn validate_config_json(config_json: &str) -> PyResult<bool> {
    let config = parse_config(config_json).map_err(PyValueError::new_err)?;
    config
        .validate()
        .map(|_| true)
        .map_err(|e| PyValueError::new_err(format!("invalid automata configuration: {e}")))
}

fn parse_config(config_json: &str) -> Result<AutomataConfig, String> {
    serde_json::from_str(config_json).map_err(|e| format!("invalid config json: {e}"))
}

/// Field generator handle. Frames come back as lists of rows.
#[pyclass(module = "reward_automata._core")]
struct Automata {
    inner: FieldGenerator,
}

#[pymethods]
impl Automata {
    #[new]
    #[pyo3(signature = (n, beauty_factor=0.5, seed=0))]
    fn new(n: usize, beauty_factor: f64, seed: u64) -> PyResult<Self> {
        let inner = FieldGenerator::new(n, beauty_factor, create_rng(seed))
            .map_err(|e| PyValueError::new_err(format!("invalid automata: {e}")))?;
        Ok(Self { inner })
    }

    #[staticmethod]
    fn from_config_json(config_json: &str) -> PyResult<Self> {
        let config = parse_config(config_json).map_err(PyValueError::new_err)?;
        let inner = FieldGenerator::from_config(&config)
            .map_err(|e| PyValueError::new_err(format!("invalid automata: {e}")))?;
        Ok(Self { inner })
    }

    fn generate_frame(&mut self) -> Vec<Vec<f64>> {
        self.inner.generate_frame().to_rows()
    }

    #[getter]
    fn n(&self) -> usize {
        self.inner.size()
    }

    #[getter]
    fn beauty_factor(&self) -> f64 {
        self.inner.params().beauty_factor
    }

    #[getter]
    fn feedback_factor(&self) -> f64 {
        self.inner.params().feedback_factor
    }

    #[getter]
    fn excitation(&self) -> f64 {
        self.inner.params().excitation
    }

    #[getter]
    fn noise_factor(&self) -> f64 {
        self.inner.params().noise_factor
    }

    #[getter]
    fn sigma(&self) -> f64 {
        self.inner.params().sigma
    }

    #[getter]
    fn frame_index(&self) -> usize {
        self.inner.frame_index()
    }
}

#[pymodule]
fn _core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(version, m)?)?;
    m.add_function(wrap_pyfunction!(default_config_json, m)?)?;
    m.add_function(wrap_pyfunction!(validate_config_json, m)?)?;
    m.add_class::<Automata>()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_config_fills_defaults() {
        let config = parse_config(r#"{"grid_size": 32}"#).expect("partial config should parse");
        assert_eq!(config.grid_size, 32);
        assert_eq!(config.kernel_size, 31);
    }

    #[test]
    fn parse_config_reports_bad_json() {
        let err = parse_config("{not json").expect_err("malformed json must fail");
        assert!(err.starts_with("invalid config json"));
    }

    #[test]
    fn default_config_round_trips() {
        let json = serde_json::to_string(&AutomataConfig::default()).expect("serialize");
        let config = parse_config(&json).expect("round trip");
        assert_eq!(config.grid_size, AutomataConfig::default().grid_size);
    }
}
