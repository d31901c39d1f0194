// Two tiers: public routes need no credential, protected routes sit behind
// `middleware::require_identity` and receive the caller's `Identity`.
pub mod protected;
pub mod public;
