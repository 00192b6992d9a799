use super::AnalysisError;

/// Index of the first occurrence of the largest value.
pub fn index_of_max<T: PartialOrd>(values: &[T]) -> Result<usize, AnalysisError> {
    let mut iter = values.iter().enumerate();
    let (mut max_index, mut max_value) = iter.next().ok_or(AnalysisError::EmptyInput)?;

    for (index, value) in iter {
        if value > max_value {
            max_index = index;
            max_value = value;
        }
    }

    Ok(max_index)
}

/// First element satisfying `predicate`, together with its position.
pub fn first_matching_with_index<T, P>(
    items: &[T],
    mut predicate: P,
) -> Result<(&T, usize), AnalysisError>
where
    P: FnMut(&T) -> bool,
{
    items
        .iter()
        .enumerate()
        .find(|(_, item)| predicate(*item))
        .map(|(index, item)| (item, index))
        .ok_or(AnalysisError::NotFound)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_maximum_wins() {
        assert_eq!(index_of_max(&[3, 1, 3, 2]), Ok(0));
        assert_eq!(index_of_max(&[1, 4, 2, 4]), Ok(1));
        assert_eq!(index_of_max(&[7]), Ok(0));
        assert_eq!(index_of_max(&[0.5, 2.5, 1.0]), Ok(1));
    }

    #[test]
    fn empty_sequence_has_no_maximum() {
        let empty: [u64; 0] = [];
        assert_eq!(index_of_max(&empty), Err(AnalysisError::EmptyInput));
    }

    #[test]
    fn finds_first_match_and_index() {
        assert_eq!(first_matching_with_index(&[0, 0, 5, 2], |x| *x > 0), Ok((&5, 2)));
    }

    #[test]
    fn reports_missing_match() {
        assert_eq!(
            first_matching_with_index(&[0, 0, 0], |x| *x > 0),
            Err(AnalysisError::NotFound)
        );
        let empty: [u64; 0] = [];
        assert_eq!(
            first_matching_with_index(&empty, |_| true),
            Err(AnalysisError::NotFound)
        );
    }
}
