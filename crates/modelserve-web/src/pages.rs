//! Static pages served by the endpoint

/// Landing page for `GET /`
pub const INDEX_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head><title>Model Serving</title></head>
<body>
  <h1>Model Serving</h1>
  <p>The regression model and scaler are loaded and ready.</p>
  <p><a href="/predictdata">Submit data for prediction</a></p>
</body>
</html>
"#;

/// Form page for `GET /predictdata`
pub const FORM_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head><title>Predict</title></head>
<body>
  <h1>Predict</h1>
  <p>POST a JSON numeric array to this route, for example:</p>
  <pre>{"input": [[1.0, 2.0]]}</pre>
  <form action="/predictdata" method="post">
    <textarea name="input" rows="4" cols="60"></textarea>
    <button type="submit">Submit</button>
  </form>
</body>
</html>
"#;
