// Copyright 2026 Maurice S. Barnum
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

use thiserror::Error as ThisError;

/// Errors surfaced by the harness library.
///
/// Most misconfiguration is normalized rather than rejected, and corpus read
/// failures degrade to a partial corpus; parsing a key-strategy spec is the
/// one surface that fails loudly.
#[derive(Debug, ThisError)]
#[non_exhaustive]
pub enum Error {
    #[error(
        "Unrecognized key strategy {0:?}, expected random:<min>[-<max>], file:<path>, or wordnetdict:<path>"
    )]
    UnknownStrategy(String),

    #[error("Invalid key length in {spec:?}: {source}")]
    InvalidKeyLength {
        spec: String,
        #[source]
        source: std::num::ParseIntError,
    },

    #[error("Missing path in key strategy {0:?}")]
    MissingPath(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::info;

    #[test_log::test]
    fn test_error_messages_quote_the_input() {
        let errs = [
            Error::UnknownStrategy("bogus:3".into()),
            Error::MissingPath("file:".into()),
            Error::InvalidKeyLength {
                spec: "random:x".into(),
                source: "x".parse::<usize>().unwrap_err(),
            },
        ];
        for e in &errs {
            info!(?e);
            let msg = e.to_string();
            assert!(
                msg.contains("bogus:3")
                    || msg.contains("file:")
                    || msg.contains("random:x"),
                "message should quote the offending input: {msg}"
            );
        }
    }
}
