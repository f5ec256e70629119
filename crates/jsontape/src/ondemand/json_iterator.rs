use crate::{
    atoms,
    error::{Error, Result},
    ondemand::{IteratorLease, RawJsonString},
    padded::PaddedBytes,
    stage1::StructuralIndexes,
    stage2::StructuralIterator,
};

/// The on-demand pull cursor.
///
/// Walks the document lazily in depth-first, left-to-right order; nothing is
/// materialized and scalars are decoded only when a typed getter asks for
/// them. Every operation advances the single underlying structural cursor,
/// so exactly one walker may be live at a time — hand the cursor to a child
/// container walk with [`lease`](Self::lease).
///
/// Typed getters never move the cursor on failure: after an
/// [`Error::IncorrectType`] or [`Error::Number`] the cursor still points at
/// the offending value, so the caller can retry with a different getter or
/// [`skip`](Self::skip) it and continue.
#[derive(Debug)]
pub struct JsonIterator<'a> {
    pub(crate) iter: StructuralIterator<'a>,
}

impl<'a> JsonIterator<'a> {
    pub(crate) fn new(buf: &'a PaddedBytes, indexes: &'a StructuralIndexes) -> Self {
        Self {
            iter: StructuralIterator::new(buf, indexes, 0),
        }
    }

    /// True once every structural has been consumed.
    #[must_use]
    pub fn at_end(&self) -> bool {
        self.iter.at_end()
    }

    /// Hands the cursor to a child container walk. See [`IteratorLease`].
    pub fn lease(&mut self) -> IteratorLease<'_, 'a> {
        IteratorLease::new(self)
    }

    /// Requires the next structural to be `{` and starts an object walk.
    ///
    /// Returns whether the object has at least one field; an empty object is
    /// consumed entirely. `Error::IncorrectType` (cursor unmoved) otherwise.
    pub fn start_object(&mut self) -> Result<bool> {
        if self.iter.peek_char() != b'{' {
            return Err(Error::IncorrectType);
        }
        self.iter.advance();
        Ok(self.started_object())
    }

    /// Starts an object walk when the caller has already consumed the `{`.
    ///
    /// Consumes the `}` of an empty object; does not move otherwise.
    pub fn started_object(&mut self) -> bool {
        if self.iter.peek_char() == b'}' {
            self.iter.advance();
            return false;
        }
        true
    }

    /// At a field boundary, consumes either `,` (another field follows, the
    /// cursor lands on its key) or `}` (the object is done, the cursor moves
    /// past it).
    pub fn has_next_field(&mut self) -> Result<bool> {
        match self.iter.advance_char() {
            b',' => Ok(true),
            b'}' => Ok(false),
            _ => Err(Error::Tape("missing comma between object fields")),
        }
    }

    /// Consumes and returns the current field's key, escapes untouched.
    pub fn field_key(&mut self) -> Result<RawJsonString<'a>> {
        let key = self.iter.advance();
        if key[0] != b'"' {
            return Err(Error::Tape("missing key in object field"));
        }
        Ok(RawJsonString::from_quoted(key))
    }

    /// Consumes the `:` between a field's key and its value.
    pub fn field_value(&mut self) -> Result<()> {
        if self.iter.advance_char() != b':' {
            return Err(Error::Tape("missing colon after object key"));
        }
        Ok(())
    }

    /// Scans forward for a field whose key matches `key` byte-for-byte,
    /// skipping unmatched fields.
    ///
    /// Call with the cursor on a field key: right after
    /// [`start_object`](Self::start_object) returned `true`, or after a
    /// fully consumed field when [`has_next_field`](Self::has_next_field)
    /// returned `true`. On a match the cursor is on the field's value. On
    /// `false` the object is exhausted and the cursor is past its `}`.
    ///
    /// Matching is raw: a key containing escape sequences will not match its
    /// decoded spelling.
    pub fn find_field_raw(&mut self, key: &str) -> Result<bool> {
        loop {
            let actual = self.field_key()?;
            self.field_value()?;
            if actual == key {
                return Ok(true);
            }
            self.skip()?;
            if !self.has_next_field()? {
                return Ok(false);
            }
        }
    }

    /// Requires the next structural to be `[` and starts an array walk.
    ///
    /// Returns whether the array has at least one element; an empty array is
    /// consumed entirely. `Error::IncorrectType` (cursor unmoved) otherwise.
    pub fn start_array(&mut self) -> Result<bool> {
        if self.iter.peek_char() != b'[' {
            return Err(Error::IncorrectType);
        }
        self.iter.advance();
        Ok(self.started_array())
    }

    /// Starts an array walk when the caller has already consumed the `[`.
    pub fn started_array(&mut self) -> bool {
        if self.iter.peek_char() == b']' {
            self.iter.advance();
            return false;
        }
        true
    }

    /// At an element boundary, consumes either `,` or `]`.
    pub fn has_next_element(&mut self) -> Result<bool> {
        match self.iter.advance_char() {
            b',' => Ok(true),
            b']' => Ok(false),
            _ => Err(Error::Tape("missing comma between array elements")),
        }
    }

    /// Consumes one string value, returning its raw contents.
    pub fn get_raw_json_string(&mut self) -> Result<RawJsonString<'a>> {
        let value = self.iter.peek();
        if value[0] != b'"' {
            return Err(Error::IncorrectType);
        }
        self.iter.advance();
        Ok(RawJsonString::from_quoted(value))
    }

    /// Consumes one unsigned integer value.
    pub fn get_uint64(&mut self) -> Result<u64> {
        let value = self.iter.peek();
        if !matches!(value[0], b'-' | b'0'..=b'9') {
            return Err(Error::IncorrectType);
        }
        let parsed = atoms::parse_u64(value)?;
        self.iter.advance();
        Ok(parsed)
    }

    /// Consumes one signed integer value.
    pub fn get_int64(&mut self) -> Result<i64> {
        let value = self.iter.peek();
        if !matches!(value[0], b'-' | b'0'..=b'9') {
            return Err(Error::IncorrectType);
        }
        let parsed = atoms::parse_i64(value)?;
        self.iter.advance();
        Ok(parsed)
    }

    /// Consumes one number value as a double.
    pub fn get_double(&mut self) -> Result<f64> {
        let value = self.iter.peek();
        if !matches!(value[0], b'-' | b'0'..=b'9') {
            return Err(Error::IncorrectType);
        }
        let parsed = atoms::parse_f64(value)?;
        self.iter.advance();
        Ok(parsed)
    }

    /// Consumes one `true` or `false` literal.
    pub fn get_bool(&mut self) -> Result<bool> {
        let value = self.iter.peek();
        if atoms::is_true_atom(value) {
            self.iter.advance();
            Ok(true)
        } else if atoms::is_false_atom(value) {
            self.iter.advance();
            Ok(false)
        } else {
            Err(Error::IncorrectType)
        }
    }

    /// Consumes a `null` literal if one is next; reports whether it did.
    pub fn is_null(&mut self) -> bool {
        if atoms::is_null_atom(self.iter.peek()) {
            self.iter.advance();
            true
        } else {
            false
        }
    }

    /// Like [`get_uint64`](Self::get_uint64) for the document's single
    /// top-level scalar; additionally checks nothing follows it.
    pub fn get_root_uint64(&mut self) -> Result<u64> {
        self.assert_single_root()?;
        self.get_uint64()
    }

    pub fn get_root_int64(&mut self) -> Result<i64> {
        self.assert_single_root()?;
        self.get_int64()
    }

    pub fn get_root_double(&mut self) -> Result<f64> {
        self.assert_single_root()?;
        self.get_double()
    }

    pub fn get_root_bool(&mut self) -> Result<bool> {
        self.assert_single_root()?;
        self.get_bool()
    }

    /// Consumes a top-level `null` if that is the entire document.
    pub fn root_is_null(&mut self) -> bool {
        self.iter.remaining() == 1 && self.is_null()
    }

    fn assert_single_root(&self) -> Result<()> {
        match self.iter.remaining() {
            0 => Err(Error::Empty),
            1 => Ok(()),
            _ => Err(Error::Tape(
                "more than one JSON value at the root of the document",
            )),
        }
    }

    /// Consumes exactly one value of any type, containers included.
    pub fn skip(&mut self) -> Result<()> {
        if self.iter.at_end() {
            return Err(Error::Tape("unexpected end of document"));
        }
        match self.iter.advance_char() {
            b'{' | b'[' => {
                self.skip_container()?;
                Ok(())
            }
            _ => Ok(()),
        }
    }

    /// From inside a container, fast-forwards past the matching closer at
    /// the current depth.
    ///
    /// Returns `true` if the closer was `]`, `false` if it was `}`. Brackets
    /// inside strings are harmless: stage 1 never indexed them.
    pub fn skip_container(&mut self) -> Result<bool> {
        let mut depth = 1usize;
        loop {
            if self.iter.at_end() {
                return Err(Error::Tape("unclosed objects or arrays"));
            }
            match self.iter.advance_char() {
                b'{' | b'[' => depth += 1,
                b'}' => {
                    depth -= 1;
                    if depth == 0 {
                        return Ok(false);
                    }
                }
                b']' => {
                    depth -= 1;
                    if depth == 0 {
                        return Ok(true);
                    }
                }
                _ => {}
            }
        }
    }
}
