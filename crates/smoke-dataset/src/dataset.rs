use crate::DatasetError;

/// Random-access collection of training items.
pub trait Dataset {
    type Item;

    fn len(&self) -> usize;

    /// Load item `index`. Fails for out-of-range indices and when the item
    /// cannot be loaded.
    fn get(&self, index: usize) -> Result<Self::Item, DatasetError>;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Load every item in index order.
    fn iter(&self) -> DatasetIter<'_, Self>
    where
        Self: Sized,
    {
        DatasetIter {
            dataset: self,
            index: 0,
        }
    }
}

pub struct DatasetIter<'a, D> {
    dataset: &'a D,
    index: usize,
}

impl<D: Dataset> Iterator for DatasetIter<'_, D> {
    type Item = Result<D::Item, DatasetError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.index >= self.dataset.len() {
            return None;
        }
        let item = self.dataset.get(self.index);
        self.index += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.dataset.len().saturating_sub(self.index);
        (remaining, Some(remaining))
    }
}

impl<D: Dataset> ExactSizeIterator for DatasetIter<'_, D> {}
