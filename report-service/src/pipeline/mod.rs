use std::sync::Arc;

#[derive(thiserror::Error, Debug)]
pub enum PipelineError {
    #[error("source error: {0}")]
    Source(String),
    #[error("transform error: {0}")]
    Transform(String),
    #[error("sink error: {0}")]
    Sink(String),
}

pub trait Source<T> {
    fn load(&self) -> Result<Vec<T>, PipelineError>;
}

pub trait Transform<T> {
    fn apply(&self, input: T) -> Result<T, PipelineError>;
}

pub trait Sink<T> {
    fn write(&self, item: &T) -> Result<(), PipelineError>;
}

impl<T, K: Sink<T> + ?Sized> Sink<T> for &K {
    fn write(&self, item: &T) -> Result<(), PipelineError> {
        (**self).write(item)
    }
}

pub struct Pipeline<S, T> {
    pub source: S,
    pub transforms: Vec<Arc<dyn Transform<T>>>, // same-type transforms chain
}

impl<T, S> Pipeline<S, T>
where
    S: Source<T>,
{
    /// Loads everything from the source and runs it through the transforms.
    ///
    /// A source failure aborts the load. Records rejected by a transform are
    /// dropped and logged; the rest are returned in source order.
    pub fn load(self) -> Result<Vec<T>, PipelineError> {
        let records = self.source.load()?;
        let total = records.len();

        let mut kept = Vec::with_capacity(total);
        'records: for record in records {
            let mut current = record;
            for t in &self.transforms {
                current = match t.apply(current) {
                    Ok(next) => next,
                    Err(e) => {
                        tracing::warn!(error = %e, "record rejected by transform");
                        continue 'records;
                    }
                };
            }
            kept.push(current);
        }

        tracing::debug!(total, kept = kept.len(), "pipeline load finished");
        Ok(kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    struct VecSource(Vec<i32>);

    impl Source<i32> for VecSource {
        fn load(&self) -> Result<Vec<i32>, PipelineError> {
            Ok(self.0.clone())
        }
    }

    struct FailingSource;

    impl Source<i32> for FailingSource {
        fn load(&self) -> Result<Vec<i32>, PipelineError> {
            Err(PipelineError::Source("boom".to_string()))
        }
    }

    struct RejectOdd;

    impl Transform<i32> for RejectOdd {
        fn apply(&self, input: i32) -> Result<i32, PipelineError> {
            if input % 2 == 0 {
                Ok(input)
            } else {
                Err(PipelineError::Transform(format!("{input} is odd")))
            }
        }
    }

    struct Double;

    impl Transform<i32> for Double {
        fn apply(&self, input: i32) -> Result<i32, PipelineError> {
            Ok(input * 2)
        }
    }

    #[test]
    fn transforms_run_in_order_and_drop_rejects() {
        let pipeline: Pipeline<_, i32> = Pipeline {
            source: VecSource(vec![1, 2, 3, 4]),
            transforms: vec![Arc::new(RejectOdd), Arc::new(Double)],
        };

        assert_eq!(pipeline.load().unwrap(), vec![4, 8]);
    }

    #[test]
    fn source_failure_aborts_load() {
        let pipeline: Pipeline<_, i32> = Pipeline {
            source: FailingSource,
            transforms: vec![],
        };

        assert!(matches!(pipeline.load(), Err(PipelineError::Source(_))));
    }

    #[test]
    fn sink_is_usable_through_a_reference() {
        struct Recording(RefCell<Vec<i32>>);

        impl Sink<i32> for Recording {
            fn write(&self, item: &i32) -> Result<(), PipelineError> {
                self.0.borrow_mut().push(*item);
                Ok(())
            }
        }

        fn write_twice<K: Sink<i32>>(sink: K) {
            sink.write(&7).unwrap();
            sink.write(&7).unwrap();
        }

        let sink = Recording(RefCell::new(Vec::new()));
        write_twice(&sink);
        assert_eq!(*sink.0.borrow(), vec![7, 7]);
    }
}
