//! The record template repeated by flat-array fixtures.
//!
//! The exact bytes matter: the record length is the divisor used to turn a
//! megabyte target into a record count, so a change in indentation changes
//! every flat fixture.

/// One element of a flat fixture, exactly as it appears in the file.
///
/// Leading tab, 8-space field indentation, 4-space closing indentation and no
/// trailing newline.
pub const FIXTURE_RECORD: &str = concat!(
    "\t{\n",
    "        \"key1\": \"value\",\n",
    "        \"array\": [],\n",
    "        \"obj\": {},\n",
    "        \"atomArray\": [11201,1e112,true,false,null,\"str\"]\n",
    "    }",
);

/// Byte length of [`FIXTURE_RECORD`].
pub const RECORD_LEN: usize = FIXTURE_RECORD.len();

/// Text placed between consecutive records.
pub const RECORD_SEPARATOR: &str = ",\n";

/// Opening of a flat fixture.
pub const ARRAY_OPEN: &str = "[\n";

/// Closing of a flat fixture (no trailing newline).
pub const ARRAY_CLOSE: &str = "\n]";
