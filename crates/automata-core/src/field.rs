/// Square scalar field, stored row-major.
#[derive(Clone, Debug, PartialEq)]
pub struct Field {
    size: usize,
    data: Vec<f64>,
}

impl Field {
    pub fn zeros(size: usize) -> Self {
        Self {
            size,
            data: vec![0.0; size * size],
        }
    }

    /// Wrap existing row-major values. Returns `None` unless `data.len() == size * size`.
    pub fn from_data(size: usize, data: Vec<f64>) -> Option<Self> {
        (data.len() == size * size).then_some(Self { size, data })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Row and column count, always equal.
    pub fn shape(&self) -> (usize, usize) {
        (self.size, self.size)
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Value at column `x`, row `y`.
    pub fn get(&self, x: usize, y: usize) -> f64 {
        self.data[y * self.size + x]
    }

    pub fn data(&self) -> &[f64] {
        &self.data
    }

    pub(crate) fn data_mut(&mut self) -> &mut [f64] {
        &mut self.data
    }

    /// Exchange storage with a buffer of the same length. The field's shape is unchanged.
    pub(crate) fn swap_data(&mut self, other: &mut Vec<f64>) {
        debug_assert_eq!(other.len(), self.data.len(), "swapped buffer must keep the shape");
        std::mem::swap(&mut self.data, other);
    }

    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        // `chunks_exact(0)` panics; an empty field simply has no rows.
        self.data.chunks_exact(self.size.max(1))
    }

    /// Copy into nested row vectors, e.g. for handing frames to Python.
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.rows().map(<[f64]>::to_vec).collect()
    }

    pub fn is_finite(&self) -> bool {
        self.data.iter().all(|v| v.is_finite())
    }

    pub fn min(&self) -> f64 {
        self.data.iter().copied().fold(f64::INFINITY, f64::min)
    }

    pub fn max(&self) -> f64 {
        self.data.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    }
}

#[cfg(test)]
mod tests {
    use super::Field;

    #[test]
    fn from_data_checks_length() {
        assert!(Field::from_data(2, vec![0.0; 3]).is_none());
        let field = Field::from_data(2, vec![1.0, 2.0, 3.0, 4.0]).expect("square data");
        assert_eq!(field.get(1, 0), 2.0);
        assert_eq!(field.get(0, 1), 3.0);
    }

    #[test]
    fn rows_split_by_size() {
        let field = Field::from_data(3, (0..9).map(f64::from).collect()).expect("square data");
        let rows = field.to_rows();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[2], vec![6.0, 7.0, 8.0]);
    }

    #[test]
    fn extremes_and_finiteness() {
        let mut field = Field::zeros(2);
        field.data_mut().copy_from_slice(&[-0.5, 0.25, 2.0, 0.0]);
        assert_eq!(field.min(), -0.5);
        assert_eq!(field.max(), 2.0);
        assert!(field.is_finite());
        field.data_mut()[1] = f64::NAN;
        assert!(!field.is_finite());
    }
}
