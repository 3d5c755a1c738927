use serde::Deserialize;

// ---------------------------------------------------------------------------
// Response envelope
//
// Success:
//   { "results": { "date": "2024-06-01", "sunrise": "05:36:14",
//                  "sunset": "18:39:33", ... }, "status": "OK" }
//
// Failure:
//   { "results": "", "status": "INVALID_REQUEST" }
//
// On failure `results` is not an object, so it is captured loosely and only
// interpreted once `status` says the call succeeded.
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct SunResponse {
    pub status: String,
    #[serde(default)]
    pub results: serde_json::Value,
}

#[derive(Debug, Deserialize)]
pub struct SunResults {
    /// `HH:MM:SS` when requested with `time_format=24`.
    pub sunset: String,
}

impl SunResponse {
    /// Unwrap the `results` object, mapping a non-`OK` status to an error
    /// message.
    pub fn into_result(self) -> Result<SunResults, String> {
        if self.status != "OK" {
            return Err(format!("lookup returned status {:?}", self.status));
        }
        serde_json::from_value(self.results).map_err(|e| format!("malformed results: {e}"))
    }
}
