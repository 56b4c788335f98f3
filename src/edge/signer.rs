//! Edge-sign adapter for signed function URL origins.
//!
//! # Responsibilities
//! - Create the signing edge function (signed mode only)
//! - Grant it invoke rights on the server and image function URLs
//! - Produce the origin-request transform shared by both bundles
//!
//! Removable once the platform can authorize function URL origins natively.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::distribution::{RequestTransform, TransformEvent};
use crate::error::ComposeResult;
use crate::platform::{CdnPlatform, EdgeFunctionSpec, EDGE_REGION};

/// Principals the edge function acts as when calling a function URL.
pub const EDGE_INVOKE_PRINCIPALS: [&str; 2] = ["edgelambda.amazonaws.com", "lambda.amazonaws.com"];

pub const SIGNER_FUNCTION_NAME: &str = "sign-function-url";

/// Origin-request handler signing the request for the `lambda` service with
/// the edge function's own role credentials.
pub const SIGNER_CODE: &str = r#"const { SignatureV4 } = require("@smithy/signature-v4");
const { Sha256 } = require("@aws-crypto/sha256-js");

exports.handler = async (event) => {
  const request = event.Records[0].cf.request;
  const host = request.origin.custom.domainName;
  const region = host.split(".")[2];
  const body = request.body && request.body.data
    ? Buffer.from(request.body.data, request.body.encoding === "base64" ? "base64" : "utf8")
    : undefined;

  const signer = new SignatureV4({
    service: "lambda",
    region,
    sha256: Sha256,
    credentials: {
      accessKeyId: process.env.AWS_ACCESS_KEY_ID,
      secretAccessKey: process.env.AWS_SECRET_ACCESS_KEY,
      sessionToken: process.env.AWS_SESSION_TOKEN,
    },
  });
  const signed = await signer.sign({
    method: request.method,
    protocol: "https:",
    hostname: host,
    path: request.uri,
    query: Object.fromEntries(new URLSearchParams(request.querystring)),
    headers: { host },
    body,
  });

  for (const [name, value] of Object.entries(signed.headers)) {
    request.headers[name.toLowerCase()] = [{ key: name, value }];
  }
  return request;
};"#;

/// Authorization mode of the backend function URLs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FunctionUrlAuth {
    /// Open function URLs, no signing.
    #[default]
    None,
    /// Function URLs require signed requests.
    AwsIam,
}

pub fn signer_function_spec() -> EdgeFunctionSpec {
    EdgeFunctionSpec {
        name: SIGNER_FUNCTION_NAME.to_string(),
        region: EDGE_REGION.to_string(),
        handler: "index.handler".to_string(),
        description: "Signs origin requests to function URL backends".to_string(),
        code: SIGNER_CODE.to_string(),
    }
}

/// Provision the signer when `auth` requires it.
///
/// Returns the transforms to attach to the server and image bundles: empty in
/// open mode, exactly one in signed mode.
pub fn edge_sign_transforms(
    auth: FunctionUrlAuth,
    platform: &mut dyn CdnPlatform,
    server_url: &Url,
    image_url: &Url,
) -> ComposeResult<Vec<RequestTransform>> {
    if auth == FunctionUrlAuth::None {
        return Ok(Vec::new());
    }

    let function = platform.create_edge_function(&signer_function_spec())?;

    for endpoint in [server_url, image_url] {
        for principal in EDGE_INVOKE_PRINCIPALS {
            platform.grant_invoke(&function, principal, endpoint)?;
        }
    }

    tracing::info!(
        function = %function.version_arn,
        "Edge signer attached to function URL origins"
    );

    Ok(vec![RequestTransform::EdgeFunction {
        function,
        event: TransformEvent::OriginRequest,
        include_body: true,
    }])
}
