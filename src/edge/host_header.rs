//! Viewer-request function copying `Host` into `x-forwarded-host`.
//!
//! The server origin receives the function URL host in `Host`; the viewer's
//! host is only visible to it through this header.

use crate::distribution::{RequestTransform, TransformEvent};
use crate::error::ComposeResult;
use crate::platform::{CdnPlatform, ViewerFunctionSpec};

pub const HOST_FORWARDING_FUNCTION_NAME: &str = "forward-host-header";

pub const HOST_FORWARDING_CODE: &str = r#"function handler(event) {
  var request = event.request;
  request.headers["x-forwarded-host"] = request.headers.host;
  return request;
}"#;

pub fn host_forwarding_transform(
    platform: &mut dyn CdnPlatform,
) -> ComposeResult<RequestTransform> {
    let function = platform.create_viewer_function(&ViewerFunctionSpec {
        name: HOST_FORWARDING_FUNCTION_NAME.to_string(),
        code: HOST_FORWARDING_CODE.to_string(),
    })?;

    Ok(RequestTransform::ViewerFunction {
        function,
        event: TransformEvent::ViewerRequest,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::PlanningPlatform;

    #[test]
    fn test_viewer_request_transform() {
        let mut platform = PlanningPlatform::new();
        let transform = host_forwarding_transform(&mut platform).unwrap();
        match transform {
            RequestTransform::ViewerFunction { function, event } => {
                assert_eq!(function.name, HOST_FORWARDING_FUNCTION_NAME);
                assert_eq!(event, TransformEvent::ViewerRequest);
            }
            other => panic!("unexpected transform: {:?}", other),
        }
        assert!(HOST_FORWARDING_CODE
            .contains(r#"headers["x-forwarded-host"] = request.headers.host"#));
    }
}
