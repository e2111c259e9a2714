use crate::Reflect;
use crate::ops::{ReflectMut, ReflectRef};

fn step(value: &dyn Reflect, index: usize) -> Option<&dyn Reflect> {
    let value = match value.reflect_ref() {
        ReflectRef::Optional(optional) => optional.value()?,
        _ => value,
    };
    match value.reflect_ref() {
        ReflectRef::Struct(record) => record.field_at(index),
        _ => None,
    }
}

fn step_mut(value: &mut dyn Reflect, index: usize) -> Option<&mut dyn Reflect> {
    match value.reflect_mut() {
        ReflectMut::Optional(optional) => match optional.get_or_insert_default().reflect_mut() {
            ReflectMut::Struct(record) => record.field_at_mut(index),
            _ => None,
        },
        ReflectMut::Struct(record) => record.field_at_mut(index),
        _ => None,
    }
}

/// Follows a field index path from `root`.
///
/// Returns `None` if a nullable structure on the way is empty, or if the path
/// does not match the shape of `root`.
///
/// ```
/// use rowkit_reflect::derive::Reflect;
/// use rowkit_reflect::ops::{ReflectRef, ScalarRef, value_at_path};
///
/// #[derive(Reflect, Default)]
/// struct Point { pub x: i32, pub y: i32 }
///
/// #[derive(Reflect, Default)]
/// struct Shape { pub origin: Point, pub next: Option<Point> }
///
/// let shape = Shape { origin: Point { x: 1, y: 2 }, next: None };
/// let y = value_at_path(&shape, &[0, 1]).unwrap();
/// let ReflectRef::Scalar(y) = y.reflect_ref() else { unreachable!() };
/// assert_eq!(y.scalar(), ScalarRef::Int(2));
/// assert!(value_at_path(&shape, &[1, 0]).is_none());
/// ```
pub fn value_at_path<'a>(root: &'a dyn Reflect, path: &[usize]) -> Option<&'a dyn Reflect> {
    let mut current = root;
    for &index in path {
        current = step(current, index)?;
    }
    Some(current)
}

/// Follows a field index path from `root`, allocating empty nullable
/// structures on the way with their default value.
pub fn value_at_path_mut<'a>(
    root: &'a mut dyn Reflect,
    path: &[usize],
) -> Option<&'a mut dyn Reflect> {
    let mut current = root;
    for &index in path {
        current = step_mut(current, index)?;
    }
    Some(current)
}
