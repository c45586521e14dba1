//! Códigos estables (estilo UUID) por regla de validación y por tipo de error.
//!
//! Los clientes de un transporte identifican el fallo por `code`, nunca por
//! el mensaje. Una vez publicados NO deben cambiar.

// -- reglas genéricas de Input --
pub const REQUIRED: &str = "1f7d2a64-5b0e-4c1a-9e3f-0a6b8c2d4e01";
pub const VECTOR_EXPECTED: &str = "1f7d2a64-5b0e-4c1a-9e3f-0a6b8c2d4e02";
pub const SCALAR_EXPECTED: &str = "1f7d2a64-5b0e-4c1a-9e3f-0a6b8c2d4e03";
pub const WRONG_TYPE: &str = "1f7d2a64-5b0e-4c1a-9e3f-0a6b8c2d4e04";
pub const PRIMITIVE_EXPECTED: &str = "1f7d2a64-5b0e-4c1a-9e3f-0a6b8c2d4e05";
pub const INVALID_FORMAT: &str = "1f7d2a64-5b0e-4c1a-9e3f-0a6b8c2d4e06";
pub const CUSTOM: &str = "1f7d2a64-5b0e-4c1a-9e3f-0a6b8c2d4e07";

// -- numeric --
pub const BELOW_MIN: &str = "5c0e9b37-2d41-4f86-a7c5-3e9d1b0f6a11";
pub const ABOVE_MAX: &str = "5c0e9b37-2d41-4f86-a7c5-3e9d1b0f6a12";
pub const NOT_INTEGER: &str = "5c0e9b37-2d41-4f86-a7c5-3e9d1b0f6a13";

// -- text y derivados --
pub const TOO_SHORT: &str = "8a4f3c21-7e6d-4b59-b0a2-4c1e5d9f7b21";
pub const TOO_LONG: &str = "8a4f3c21-7e6d-4b59-b0a2-4c1e5d9f7b22";
pub const PATTERN_MISMATCH: &str = "8a4f3c21-7e6d-4b59-b0a2-4c1e5d9f7b23";
pub const OPTION_NOT_ALLOWED: &str = "8a4f3c21-7e6d-4b59-b0a2-4c1e5d9f7b24";
pub const INVALID_EMAIL: &str = "8a4f3c21-7e6d-4b59-b0a2-4c1e5d9f7b25";
pub const INVALID_URL: &str = "8a4f3c21-7e6d-4b59-b0a2-4c1e5d9f7b26";
pub const INVALID_IP: &str = "8a4f3c21-7e6d-4b59-b0a2-4c1e5d9f7b27";
pub const INVALID_HEX: &str = "8a4f3c21-7e6d-4b59-b0a2-4c1e5d9f7b28";

// -- filePath / buf --
pub const PATH_NOT_FOUND: &str = "d3b61e08-9c7a-4e25-8f14-6a0c2b7e5d31";
pub const PATH_IS_DIRECTORY: &str = "d3b61e08-9c7a-4e25-8f14-6a0c2b7e5d32";
pub const TOO_LARGE: &str = "d3b61e08-9c7a-4e25-8f14-6a0c2b7e5d33";

// -- kinds de dominio --
pub const CONFLICT: &str = "e6a91f52-0b3d-47c8-9d26-7f4e1a3c8b41";
pub const NOT_FOUND: &str = "e6a91f52-0b3d-47c8-9d26-7f4e1a3c8b42";
pub const NO_CONTENT: &str = "e6a91f52-0b3d-47c8-9d26-7f4e1a3c8b43";

// -- fallos del framework (kind interno) --
pub const INTERNAL: &str = "0b2c7d94-6e1f-4a38-b5d0-9c8e2f4a6d51";
pub const ILLEGAL_NAME: &str = "0b2c7d94-6e1f-4a38-b5d0-9c8e2f4a6d52";
pub const NOT_REGISTERED: &str = "0b2c7d94-6e1f-4a38-b5d0-9c8e2f4a6d53";
pub const SYNTAX: &str = "0b2c7d94-6e1f-4a38-b5d0-9c8e2f4a6d54";
pub const UNKNOWN_PROPERTY: &str = "0b2c7d94-6e1f-4a38-b5d0-9c8e2f4a6d55";
pub const PROPERTY_LOCKED: &str = "0b2c7d94-6e1f-4a38-b5d0-9c8e2f4a6d56";
pub const READ_ONLY: &str = "0b2c7d94-6e1f-4a38-b5d0-9c8e2f4a6d57";
pub const SERIALIZATION_NOT_SUPPORTED: &str = "0b2c7d94-6e1f-4a38-b5d0-9c8e2f4a6d58";
pub const CONTRACT: &str = "0b2c7d94-6e1f-4a38-b5d0-9c8e2f4a6d59";
pub const NOT_IMPLEMENTED: &str = "0b2c7d94-6e1f-4a38-b5d0-9c8e2f4a6d5a";
pub const ALREADY_FINALIZED: &str = "0b2c7d94-6e1f-4a38-b5d0-9c8e2f4a6d5b";
