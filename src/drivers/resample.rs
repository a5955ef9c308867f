use crate::drivers::ScopeError;
/// Stretches (or shrinks) `data` to `new_len` by repeating the nearest source
/// element: `out[i] = data[i * data.len() / new_len]`.
pub fn nearest_neighbor<T: Copy>(data: &[T], new_len: usize) -> Result<Vec<T>, ScopeError> {
    if data.is_empty() {
        return Err(ScopeError::DegenerateInput(
            "cannot resample an empty source".into(),
        ));
    }
    if new_len == 0 {
        return Err(ScopeError::DegenerateInput(
            "resample target length must be non-zero".into(),
        ));
    }
    if new_len == data.len() {
        return Ok(data.to_vec());
    }
    let old_len = data.len();
    Ok((0..new_len).map(|i| data[i * old_len / new_len]).collect())
}
