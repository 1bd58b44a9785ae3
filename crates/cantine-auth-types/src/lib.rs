//! Access-token types shared by the token-issuing handlers and the
//! bearer-token extractor.

pub mod identity;
pub mod token;
