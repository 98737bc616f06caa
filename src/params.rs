use crate::error::{Result, SortingHatError};

// A parameter that is either shared by all classes or given per class,
// in the same order as the labels
#[derive(Debug, Clone, PartialEq)]
pub enum ClassParam<T> {
    Scalar(T),
    PerClass(Vec<T>),
}

impl<T: Clone> ClassParam<T> {
    // Expand to exactly one value per label
    pub fn resolve(&self, n_labels: usize, parameter: &'static str) -> Result<Vec<T>> {
        match self {
            ClassParam::Scalar(value) => Ok(vec![value.clone(); n_labels]),
            ClassParam::PerClass(values) if values.len() == n_labels => Ok(values.clone()),
            ClassParam::PerClass(values) => Err(SortingHatError::LengthMismatch {
                parameter,
                expected: n_labels,
                actual: values.len(),
            }),
        }
    }

    // The CLI passes everything as lists, so a single entry means "all classes"
    pub fn from_cli(mut values: Vec<T>) -> Self {
        if values.len() == 1 {
            ClassParam::Scalar(values.remove(0))
        } else {
            ClassParam::PerClass(values)
        }
    }
}

impl From<f64> for ClassParam<f64> {
    fn from(value: f64) -> Self {
        ClassParam::Scalar(value)
    }
}

impl From<usize> for ClassParam<usize> {
    fn from(value: usize) -> Self {
        ClassParam::Scalar(value)
    }
}

impl<T> From<Vec<T>> for ClassParam<T> {
    fn from(values: Vec<T>) -> Self {
        ClassParam::PerClass(values)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassRecord {
    pub mean: f64,
    pub std: f64,
    pub sample_count: usize,
}

// One record per label, in label order
#[derive(Debug, Clone, PartialEq)]
pub struct ClassParameters<L> {
    classes: Vec<(L, ClassRecord)>,
}

impl<L: Clone> ClassParameters<L> {
    pub fn new(
        labels: &[L],
        means: &ClassParam<f64>,
        stds: &ClassParam<f64>,
        sample_counts: &ClassParam<usize>,
    ) -> Result<Self> {
        let n_labels = labels.len();
        let means = means.resolve(n_labels, "means")?;
        let stds = stds.resolve(n_labels, "stds")?;
        let sample_counts = sample_counts.resolve(n_labels, "sample_counts")?;

        let classes = labels
            .iter()
            .cloned()
            .zip(means)
            .zip(stds)
            .zip(sample_counts)
            .map(|(((label, mean), std), sample_count)| {
                (
                    label,
                    ClassRecord {
                        mean,
                        std,
                        sample_count,
                    },
                )
            })
            .collect();

        Ok(Self { classes })
    }
}

impl<L> ClassParameters<L> {
    pub fn iter(&self) -> impl Iterator<Item = &(L, ClassRecord)> {
        self.classes.iter()
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn total_samples(&self) -> usize {
        self.classes.iter().map(|(_, record)| record.sample_count).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_broadcasts() {
        let param = ClassParam::Scalar(2.5);
        assert_eq!(param.resolve(3, "means").unwrap(), vec![2.5, 2.5, 2.5]);
    }

    #[test]
    fn test_per_class_kept_in_order() {
        let param = ClassParam::PerClass(vec![1, 2, 3]);
        assert_eq!(param.resolve(3, "sample_counts").unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn test_length_mismatch() {
        let param = ClassParam::PerClass(vec![1.0, 2.0]);
        match param.resolve(3, "stds") {
            Err(SortingHatError::LengthMismatch {
                parameter,
                expected,
                actual,
            }) => {
                assert_eq!(parameter, "stds");
                assert_eq!(expected, 3);
                assert_eq!(actual, 2);
            }
            other => panic!("expected a length mismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_from_cli() {
        assert_eq!(ClassParam::from_cli(vec![4]), ClassParam::Scalar(4));
        assert_eq!(
            ClassParam::from_cli(vec![4, 5]),
            ClassParam::PerClass(vec![4, 5])
        );
    }

    #[test]
    fn test_class_parameters_zip() {
        let params = ClassParameters::new(
            &["a", "b"],
            &ClassParam::PerClass(vec![0.0, 10.0]),
            &ClassParam::Scalar(1.0),
            &ClassParam::PerClass(vec![2, 3]),
        )
        .unwrap();

        let classes: Vec<_> = params.iter().cloned().collect();
        assert_eq!(classes.len(), 2);
        assert_eq!(classes[0].0, "a");
        assert_eq!(
            classes[1].1,
            ClassRecord {
                mean: 10.0,
                std: 1.0,
                sample_count: 3
            }
        );
        assert_eq!(params.total_samples(), 5);
    }
}
