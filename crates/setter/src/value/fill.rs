// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Recursive struct population from a [`Getter`].

use super::Value;
use crate::error::{Result, SetError};
use crate::getter::{Getter, Got};

impl Value<'_> {
    /// Populate every visible field, looking each one up by name.
    ///
    /// - [`Got::Getter`] fills a struct field recursively, or replaces a
    ///   slice-of-structs field with one element filled from it.
    /// - [`Got::Getters`] replaces a slice-of-structs field with one element
    ///   per entry, or fills a struct field from the last entry.
    /// - anything else is assigned with [`Value::to`].
    ///
    /// Stops at the first failing field. Fields before it keep what was
    /// assigned; fields after it are not visited.
    pub fn fill(&mut self, getter: &dyn Getter) -> Result<()> {
        self.fill_with(getter, None)
    }

    /// Like [`Value::fill`], but only fields annotated with `key` take part
    /// and they are looked up by the annotation value.
    pub fn fill_by_tag(&mut self, key: &str, getter: &dyn Getter) -> Result<()> {
        self.fill_with(getter, Some(key))
    }

    fn fill_with(&mut self, getter: &dyn Getter, tag: Option<&str>) -> Result<()> {
        if self.is_nil() {
            return Err(SetError::NilReceiver);
        }
        if !self.info.is_struct() {
            let op = if tag.is_some() { "fill_by_tag" } else { "fill" };
            return Err(SetError::unsupported(op, self.type_name()));
        }

        let fields = match tag {
            Some(key) => self.fields_by_tag(key),
            None => self.fields(),
        };
        for mut field in fields {
            let name = field.info.name;
            let key = field.tag_value.unwrap_or(name);
            let got = getter.get(key);
            log::trace!("[fill] {} <- {:?} ({})", name, key, got.kind());

            field
                .value
                .fill_field(got, key, name, tag)
                .map_err(|err| err.in_field(name))?;
        }
        Ok(())
    }

    fn fill_field(&mut self, got: Got, key: &str, name: &'static str, tag: Option<&str>) -> Result<()> {
        match got {
            Got::Getter(nested) => {
                if self.info.is_struct() {
                    self.fill_with(&*nested, tag)
                } else if self.is_struct_slice() {
                    self.zero()?;
                    self.fill_elem(&*nested, tag)
                } else {
                    Err(shape_mismatch(key, name, "a getter"))
                }
            }
            Got::Getters(list) => {
                if self.is_struct_slice() {
                    self.zero()?;
                    for (index, nested) in list.iter().enumerate() {
                        self.fill_elem(&**nested, tag)
                            .map_err(|err| err.in_element(index))?;
                    }
                    Ok(())
                } else if self.info.is_struct() {
                    match list.last() {
                        Some(last) => self.fill_with(&**last, tag),
                        None => Ok(()),
                    }
                } else {
                    Err(shape_mismatch(key, name, "a list of getters"))
                }
            }
            Got::Value(value) => self.to(&*value),
            Got::Nil => self.to(&()),
        }
    }

    /// Build one element, fill it and append it.
    fn fill_elem(&mut self, getter: &dyn Getter, tag: Option<&str>) -> Result<()> {
        let mut elem = self.new_elem()?;
        elem.fill_with(getter, tag)?;
        self.push_elem(elem)
    }
}

fn shape_mismatch(key: &str, field: &'static str, got: &'static str) -> SetError {
    SetError::ShapeMismatch {
        key: key.to_string(),
        field,
        got,
    }
}
