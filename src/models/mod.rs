//! Trainable model implementations selectable by name.

mod digits_mnist;
mod dog_breeds;
mod test_model;

pub use digits_mnist::DigitsMnist;
pub use dog_breeds::DogBreedModel;
pub use test_model::TestModel;

use anyhow::Result;

/// Common capability of every registered model.
///
/// A model is constructed with an opaque architecture value and then driven
/// entirely through [`train`](Trainable::train); no further external input
/// arrives after construction.
pub trait Trainable {
    /// Concrete implementation name, as reported when the model is
    /// instantiated.
    fn name(&self) -> &'static str;

    /// Run the training loop to completion.
    fn train(&mut self) -> Result<()>;
}
