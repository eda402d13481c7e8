use axum::response::Html;
use std::sync::OnceLock;

use crate::fallback::FALLBACK_ROASTS;

const FALLBACK_PLACEHOLDER: &str = "__FALLBACK_ROASTS__";

/// `GET /`
pub async fn index() -> Html<&'static str> {
    Html(render())
}

fn render() -> &'static str {
    static PAGE: OnceLock<String> = OnceLock::new();
    PAGE.get_or_init(|| {
        let fallbacks = serde_json::to_string(&FALLBACK_ROASTS).unwrap_or_else(|_| "[]".to_string());
        TEMPLATE.replace(FALLBACK_PLACEHOLDER, &fallbacks)
    })
}

const TEMPLATE: &str = r#"
<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Byte Roast</title>
    <style>
        * {
            margin: 0;
            padding: 0;
            box-sizing: border-box;
        }

        body {
            font-family: 'Poppins', -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            background: radial-gradient(circle at top, #2a0a0a 0%, #0d0d0d 70%);
            min-height: 100vh;
            display: flex;
            align-items: center;
            justify-content: center;
            padding: 20px;
            color: #e5e5e5;
        }

        .container {
            background: rgba(20, 20, 20, 0.9);
            box-shadow: 0 20px 60px rgba(255, 60, 0, 0.15);
            max-width: 900px;
            width: 100%;
            padding: 60px;
            text-align: center;
        }

        h1 {
            color: #fff;
            margin-bottom: 12px;
            font-size: 2.6em;
        }

        h1 .accent {
            background: linear-gradient(90deg, #ff3c00, #ffb300);
            -webkit-background-clip: text;
            background-clip: text;
            color: transparent;
        }

        .subtitle {
            color: #9a9a9a;
            margin-bottom: 40px;
            font-size: 1.1em;
        }

        .upload-area {
            border: 2px dashed #555;
            padding: 60px 20px;
            cursor: pointer;
            transition: all 0.3s;
            margin-bottom: 30px;
        }

        .upload-area:hover,
        .upload-area.dragover {
            border-color: #ff3c00;
            background: rgba(255, 255, 255, 0.04);
        }

        .upload-icon {
            font-size: 4em;
            margin-bottom: 20px;
        }

        .upload-text {
            color: #bbb;
            font-size: 1.2em;
            margin-bottom: 8px;
        }

        .upload-hint {
            color: #777;
            font-size: 0.9em;
        }

        input[type="file"] {
            display: none;
        }

        .preview-image {
            max-height: 320px;
            max-width: 100%;
            margin-bottom: 30px;
            border: 1px solid #444;
            display: none;
        }

        .roast-button {
            background: linear-gradient(90deg, #ff3c00, #ff7a00);
            color: #fff;
            border: 0;
            padding: 18px 56px;
            font-size: 1.3em;
            font-weight: 700;
            cursor: pointer;
            margin-bottom: 30px;
            transition: transform 0.3s;
        }

        .roast-button:hover:not(:disabled) {
            transform: scale(1.08);
        }

        .roast-button:disabled {
            opacity: 0.5;
            cursor: not-allowed;
        }

        .result {
            background: rgba(255, 255, 255, 0.04);
            padding: 30px 40px;
            text-align: left;
            position: relative;
            display: none;
        }

        .result-text {
            font-family: 'SFMono-Regular', Menlo, Consolas, monospace;
            font-size: 1.1em;
            line-height: 1.6;
            white-space: pre-wrap;
            overflow-wrap: anywhere;
        }

        .copy-button {
            margin-top: 20px;
            background: rgba(255, 255, 255, 0.1);
            color: #ccc;
            border: 1px solid #555;
            padding: 8px 18px;
            cursor: pointer;
        }

        .copy-button:hover {
            background: rgba(255, 255, 255, 0.2);
            color: #fff;
        }

        .toast {
            position: fixed;
            bottom: 24px;
            right: 24px;
            background: #1f1f1f;
            border-left: 4px solid #ff7a00;
            padding: 14px 20px;
            text-align: left;
            opacity: 0;
            transition: opacity 0.3s;
            pointer-events: none;
        }

        .toast.visible {
            opacity: 1;
        }

        .toast.destructive {
            border-left-color: #e11d48;
        }

        .toast-title {
            font-weight: 700;
            margin-bottom: 4px;
        }

        .toast-description {
            color: #aaa;
            font-size: 0.9em;
        }

        .footer {
            margin-top: 40px;
            padding-top: 24px;
            border-top: 1px solid #2a2a2a;
            color: #666;
            font-size: 0.85em;
        }

        .footer span {
            color: rgba(248, 113, 113, 0.7);
        }
    </style>
</head>
<body>
    <div class="container">
        <h1>Upload &amp; Get <span class="accent">Roasted 🔥</span></h1>
        <p class="subtitle">AI-powered roasts that hit different 💀</p>

        <div class="upload-area" id="uploadArea">
            <div class="upload-icon">☁️</div>
            <div class="upload-text">Drop your image here or click to upload</div>
            <div class="upload-hint">Supports JPG, PNG, GIF • Max 10MB</div>
            <input type="file" id="fileInput" accept="image/*">
        </div>

        <img id="previewImage" class="preview-image" alt="Preview">

        <div>
            <button class="roast-button" id="roastButton" disabled>🔥 Roast Me 🔥</button>
        </div>

        <div class="result" id="result">
            <p class="result-text" id="roastText"></p>
            <button class="copy-button" id="copyButton">📋 Copy Roast</button>
        </div>

        <div class="footer">
            Powered by AI • All roasts are for entertainment • <span>Handle with care 🔥</span>
        </div>
    </div>

    <div class="toast" id="toast">
        <div class="toast-title" id="toastTitle"></div>
        <div class="toast-description" id="toastDescription"></div>
    </div>

    <script>
        const FALLBACK_ROASTS = __FALLBACK_ROASTS__;

        const uploadArea = document.getElementById('uploadArea');
        const fileInput = document.getElementById('fileInput');
        const previewImage = document.getElementById('previewImage');
        const roastButton = document.getElementById('roastButton');
        const result = document.getElementById('result');
        const roastText = document.getElementById('roastText');
        const copyButton = document.getElementById('copyButton');
        const toastBox = document.getElementById('toast');
        const toastTitle = document.getElementById('toastTitle');
        const toastDescription = document.getElementById('toastDescription');

        // idle -> image-selected -> loading -> result-shown
        let state = { kind: 'idle' };

        function render() {
            const hasImage = state.kind !== 'idle';
            uploadArea.style.display = hasImage ? 'none' : 'block';
            previewImage.style.display = hasImage ? 'inline-block' : 'none';
            if (hasImage) {
                previewImage.src = state.preview || '';
            }

            const loading = state.kind === 'loading';
            roastButton.disabled = !hasImage || loading;
            roastButton.textContent = loading ? '🔥 Generating Roast... ✨' : '🔥 Roast Me 🔥';

            const shown = state.kind === 'result-shown' && state.roast;
            result.style.display = shown ? 'block' : 'none';
            roastText.textContent = shown ? state.roast : '';
        }

        let toastTimer = null;
        function toast(title, description, destructive) {
            toastTitle.textContent = title;
            toastDescription.textContent = description;
            toastBox.classList.toggle('destructive', !!destructive);
            toastBox.classList.add('visible');
            clearTimeout(toastTimer);
            toastTimer = setTimeout(() => toastBox.classList.remove('visible'), 3000);
        }

        function selectImage(file) {
            if (!file || !file.type.startsWith('image/') || state.kind === 'loading') {
                return;
            }
            state = { kind: 'image-selected', file, preview: null };
            const reader = new FileReader();
            reader.onload = (e) => {
                if (state.file === file) {
                    state.preview = e.target.result;
                    render();
                }
            };
            reader.readAsDataURL(file);
            render();
        }

        function fallbackRoast() {
            return FALLBACK_ROASTS[Math.floor(Math.random() * FALLBACK_ROASTS.length)];
        }

        async function generateRoast() {
            if (state.kind !== 'image-selected' && state.kind !== 'result-shown') {
                return;
            }
            const { file, preview } = state;
            state = { kind: 'loading', file, preview };
            render();

            let roast;
            try {
                const formData = new FormData();
                formData.append('image', file);

                const response = await fetch('/api/roast', {
                    method: 'POST',
                    body: formData
                });

                if (!response.ok) {
                    throw new Error(`API request failed: ${response.status} ${response.statusText}`);
                }

                const body = await response.json();
                roast = (body.roast || '').trim();
                if (!roast) {
                    throw new Error('Empty response from API');
                }

                toast('Roast delivered! 🔥', 'Your image has been thoroughly roasted!');
            } catch (error) {
                console.error('Roast generation failed:', error);
                toast('API temporarily down 💥', 'Using backup roast generator!', true);
                roast = fallbackRoast();
            }

            state = { kind: 'result-shown', file, preview: state.preview, roast };
            render();
        }

        uploadArea.addEventListener('click', () => fileInput.click());

        uploadArea.addEventListener('dragover', (e) => {
            e.preventDefault();
            uploadArea.classList.add('dragover');
        });

        uploadArea.addEventListener('dragleave', () => {
            uploadArea.classList.remove('dragover');
        });

        uploadArea.addEventListener('drop', (e) => {
            e.preventDefault();
            uploadArea.classList.remove('dragover');
            selectImage(e.dataTransfer.files[0]);
        });

        fileInput.addEventListener('change', (e) => {
            selectImage(e.target.files[0]);
        });

        roastButton.addEventListener('click', generateRoast);

        copyButton.addEventListener('click', async () => {
            if (state.kind !== 'result-shown') {
                return;
            }
            try {
                await navigator.clipboard.writeText(state.roast);
                toast('Roast copied! 🔥', 'Share the burn with your friends');
            } catch (error) {
                console.error('Copy failed:', error);
            }
        });

        render();
    </script>
</body>
</html>
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_embeds_fallbacks() {
        let page = render();
        assert!(!page.contains(FALLBACK_PLACEHOLDER));
        for roast in FALLBACK_ROASTS {
            let encoded = serde_json::to_string(roast).unwrap();
            assert!(page.contains(&encoded), "missing fallback {roast}");
        }
    }

    #[test]
    fn test_page_posts_to_proxy_route() {
        let page = render();
        assert!(page.contains("fetch('/api/roast'"));
        assert!(page.contains("formData.append('image', file)"));
    }
}
