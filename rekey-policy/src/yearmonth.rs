// Copyright 2026 Rekey Team
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Year-month zero-padding policy.
//!
//! Targets keys of the form `<var>.<yearmonth>.<ext>` where the middle
//! segment is either `YYYYM` (single-digit month) or `YYYYMM`. The 5-char
//! form gets a `0` inserted after the year, so `TMP.20111.grib2` becomes
//! `TMP.201101.grib2` (January 2011).

use rekey_core::RenamePolicy;

/// Number of dot-delimited segments a well-formed key has.
const KEY_SEGMENTS: usize = 3;
/// Length of the year-month segment that marks a key as needing the pad.
const UNPADDED_LEN: usize = 5;

/// Flags keys whose year-month segment is 5 characters and pads it to 6.
///
/// Keys that do not have exactly three dot-delimited segments are treated
/// as not needing an update; malformed keys never panic the policy.
#[derive(Debug, Clone, Copy, Default)]
pub struct YearMonthPadPolicy;

impl YearMonthPadPolicy {
    /// Returns the year-month segment of a well-formed key.
    fn year_month(key: &str) -> Option<&str> {
        let segments: Vec<&str> = key.split('.').collect();
        if segments.len() == KEY_SEGMENTS {
            Some(segments[1])
        } else {
            None
        }
    }
}

impl RenamePolicy for YearMonthPadPolicy {
    fn needs_update(&self, key: &str) -> bool {
        match Self::year_month(key) {
            // A reliable check for whether the segment is YYYYM or YYYYMM.
            Some(year_month) => year_month.len() == UNPADDED_LEN,
            None => false,
        }
    }

    fn generate_new_key(&self, key: &str) -> String {
        let segments: Vec<&str> = key.split('.').collect();
        let year_month = segments[1];
        if !year_month.is_char_boundary(4) {
            // Non-ASCII segment; leave the key alone rather than split a
            // character in half. The renamer skips unchanged keys.
            return key.to_string();
        }
        let (year, month) = year_month.split_at(4);
        format!("{}.{}0{}.{}", segments[0], year, month, segments[2])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_five_char_year_month_is_flagged() {
        let policy = YearMonthPadPolicy;
        assert!(policy.needs_update("TMP.20111.grib2"));
    }

    #[test]
    fn test_six_char_year_month_is_not_flagged() {
        let policy = YearMonthPadPolicy;
        assert!(!policy.needs_update("TMP.201101.grib2"));
        assert!(!policy.needs_update("TMP.201112.grib2"));
    }

    #[test]
    fn test_generated_key_pads_the_month() {
        let policy = YearMonthPadPolicy;
        assert_eq!(
            policy.generate_new_key("TMP.20111.grib2"),
            "TMP.201101.grib2"
        );
        assert_eq!(
            policy.generate_new_key("UGRD.20129.grib2"),
            "UGRD.201209.grib2"
        );
    }

    #[test]
    fn test_padded_key_is_stable_across_passes() {
        let policy = YearMonthPadPolicy;
        let renamed = policy.generate_new_key("TMP.20111.grib2");
        assert!(!policy.needs_update(&renamed));
    }

    #[test]
    fn test_malformed_keys_are_not_flagged() {
        let policy = YearMonthPadPolicy;
        assert!(!policy.needs_update(""));
        assert!(!policy.needs_update("no-dots-here"));
        assert!(!policy.needs_update("two.parts"));
        assert!(!policy.needs_update("a.20111.grib2.extra"));
        assert!(!policy.needs_update("...."));
    }

    #[test]
    fn test_non_ascii_segment_does_not_panic() {
        let policy = YearMonthPadPolicy;
        // 5 bytes, but a char boundary does not fall after byte 4.
        let key = "TMP.201\u{00e9}.grib2";
        if policy.needs_update(key) {
            let new_key = policy.generate_new_key(key);
            assert_eq!(new_key, key);
        }
    }
}
